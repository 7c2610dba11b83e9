//! Audit orchestration -- ordered, independent checks over collected facts.
//!
//! The orchestrator owns the run: it walks the topic table in order,
//! collects, compares, classifies, records, and reports. Checks are
//! fully independent -- nothing one check does can stop the next from
//! running -- with a single exception: topics marked fatal are
//! prerequisites, and their failure aborts the remaining run rather
//! than producing a page of meaningless offline findings.

use tracing::{debug, warn};

use crate::baseline::BaselineStore;
use crate::classify::{classify, CheckResult};
use crate::collect::FactSource;
use crate::compare::diff::{compare, TextDiff};
use crate::compare::predicate::{evaluate, Verdict};
use crate::policy::Policy;
use crate::types::{CheckKind, CheckOutcome, RunSummary, Severity, Topic};

/// Receives every outcome immediately after classification.
///
/// When `pause` is set the gate should block for operator
/// acknowledgment before returning; the outcome is already recorded
/// either way, so nothing the gate does can alter the summary.
pub trait AuditGate {
    /// Report one outcome; block for acknowledgment when `pause` is set.
    fn on_outcome(&mut self, outcome: &CheckOutcome, pause: bool);
}

/// Gate that reports nowhere and never pauses.
///
/// For library callers and tests that only want the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentGate;

impl AuditGate for SilentGate {
    fn on_outcome(&mut self, _outcome: &CheckOutcome, _pause: bool) {}
}

/// Run every topic in order and return the finalized summary.
pub fn run_audit(
    policy: &Policy,
    topics: &[Topic],
    facts: &dyn FactSource,
    store: &BaselineStore,
    gate: &mut dyn AuditGate,
) -> RunSummary {
    let mut summary = RunSummary::new();

    for topic in topics {
        let result = evaluate_topic(policy, topic, facts, store);
        let outcome = classify(topic, result);
        debug!(topic = topic.key, severity = %outcome.severity, "check classified");

        let pause = should_pause(policy, topic, &outcome);
        let fatal_failure = topic.policy.fatal && outcome.severity == Severity::Error;

        summary.record(outcome.clone());
        gate.on_outcome(&outcome, pause);

        if fatal_failure {
            warn!(topic = topic.key, "prerequisite failed, aborting run");
            summary.abort(format!("prerequisite check '{}' failed", topic.label));
            break;
        }
    }

    summary
}

/// Evaluate one topic into a raw result. Never fails: collector and
/// store trouble degrade into the result itself.
fn evaluate_topic(
    policy: &Policy,
    topic: &Topic,
    facts: &dyn FactSource,
    store: &BaselineStore,
) -> CheckResult {
    if policy.skip_expensive && topic.expensive {
        return CheckResult::Skipped("skipped by policy (expensive check)".to_string());
    }

    let fact = facts.collect(topic.key, policy);

    match &topic.kind {
        CheckKind::Predicate(spec) => {
            let eval = evaluate(&fact, spec);
            match eval.verdict {
                Verdict::Pass => CheckResult::Pass(eval.observed),
                Verdict::Fail => CheckResult::Failed {
                    observed: eval.observed,
                    evidence: eval.evidence,
                },
                Verdict::NoData => CheckResult::NoData(eval.observed),
            }
        }
        CheckKind::Snapshot { normalizer } => {
            let Some(raw) = fact.as_text() else {
                return CheckResult::NoData("source unavailable".to_string());
            };
            if !store.is_available() {
                return CheckResult::NoBaseline;
            }

            let current = normalizer.apply(raw);

            // Keep the capture around for diffing by hand and for
            // baseline promotion. Failure to persist it does not
            // affect this run's comparison.
            if let Err(e) = store.write_current_capture(topic.key, &current) {
                warn!(topic = topic.key, error = %e, "could not persist current capture");
            }

            match store.read_snapshot(topic.key) {
                Ok(None) => CheckResult::NoBaseline,
                Err(e) => {
                    warn!(topic = topic.key, error = %e, "unreadable baseline snapshot");
                    CheckResult::NoData("baseline snapshot unreadable".to_string())
                }
                Ok(Some(saved_raw)) => {
                    let saved = normalizer.apply(&saved_raw);
                    match compare(&saved, &current) {
                        TextDiff::Equal => CheckResult::Pass(String::new()),
                        TextDiff::Differing(lines) => CheckResult::Mismatch(lines),
                    }
                }
            }
        }
    }
}

/// Whether the gate should pause on this outcome.
fn should_pause(policy: &Policy, topic: &Topic, outcome: &CheckOutcome) -> bool {
    let finding = outcome.severity >= Severity::Warning;
    (topic.policy.force_ack && finding)
        || (policy.stop_on_warning && outcome.severity == Severity::Warning)
        || (policy.stop_on_error && outcome.severity == Severity::Error)
}
