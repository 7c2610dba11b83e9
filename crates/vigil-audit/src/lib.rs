//! # vigil-audit
//!
//! Baseline-comparison audit engine for desktop Linux installations.
//!
//! A single-shot, operator-invoked auditor: collect the current state
//! of the system (accounts, firewall posture, disk health, MAC
//! enforcement, packages, startup mechanisms, browser policy), compare
//! each fact against a fixed expectation or a previously promoted
//! baseline snapshot, and classify every deviation.
//!
//! ## Data Flow
//!
//! ```text
//! Phase 1: Collect (per topic, in table order)
//!   FactSource::collect(topic) -> RawFact
//!
//! Phase 2: Compare
//!   snapshot topics:  normalize(saved), normalize(current) -> line diff
//!   predicate topics: evaluate(fact, threshold) -> verdict
//!
//! Phase 3: Classify
//!   per-topic severity policy -> CheckOutcome
//!   {Success, Info, Warning, Error}
//!
//! Phase 4: Record & report
//!   RunSummary (counts + outcome log) -> AuditGate (print, maybe pause)
//! ```
//!
//! Checks are independent: a failing check never prevents later checks
//! from running. The one exception is prerequisite topics (network
//! reachability) whose failure aborts the run -- auditing repository
//! freshness offline would only produce noise.

pub mod baseline;
pub mod classify;
pub mod collect;
pub mod compare;
pub mod error;
pub mod normalize;
pub mod policy;
pub mod runner;
pub mod topics;
pub mod types;

pub use baseline::{BaselineEntry, BaselineStore};
pub use classify::{classify, CheckResult};
pub use collect::{FactSource, SystemFacts};
pub use error::{AuditError, Result};
pub use policy::Policy;
pub use runner::{run_audit, AuditGate, SilentGate};
pub use types::*;

/// Audit the local system with the default topic table.
///
/// Builds the table from the policy, opens the baseline store at the
/// policy's directory, and runs every check against live collectors.
///
/// # Errors
///
/// Returns `AuditError` when the policy fails validation or carries a
/// pattern that does not compile.
pub fn audit_system(policy: &Policy, gate: &mut dyn AuditGate) -> Result<RunSummary> {
    policy.validate()?;
    let topics = topics::default_topics(policy)?;
    let store = BaselineStore::new(policy.baseline_dir.clone());
    let facts = SystemFacts;
    Ok(runner::run_audit(policy, &topics, &facts, &store, gate))
}
