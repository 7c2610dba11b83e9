//! Severity classification of comparator results.
//!
//! All the "is this a warning or an error" knowledge lives in the
//! per-topic [`TopicPolicy`] table; this module only applies it. That
//! keeps the classification rules auditable and testable without any
//! collection machinery.

use crate::types::{CheckOutcome, Severity, Topic};

/// Raw result of evaluating one topic, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Snapshot matched, or predicate held. Carries the observed value
    /// description when there is one.
    Pass(String),
    /// Snapshot differed from the baseline; diff lines as evidence.
    Mismatch(Vec<String>),
    /// Predicate failed; observed value plus any matched lines.
    Failed {
        /// What was observed, e.g. `50 days old, expected at most 45`.
        observed: String,
        /// Matched lines backing the failure.
        evidence: Vec<String>,
    },
    /// The topic requires a baseline snapshot and none is saved.
    NoBaseline,
    /// The collector produced nothing usable.
    NoData(String),
    /// The check was intentionally not run.
    Skipped(String),
}

/// Map a comparator result to a classified outcome under the topic's
/// severity policy.
///
/// Absence cases (`NoBaseline`, `NoData`) are capped at `Warning`:
/// a check that could not run is "not configured", never "broken".
#[must_use]
pub fn classify(topic: &Topic, result: CheckResult) -> CheckOutcome {
    let (severity, message, evidence) = match result {
        CheckResult::Pass(observed) => {
            let message = if observed.is_empty() {
                "matches baseline".to_string()
            } else {
                observed
            };
            (Severity::Success, message, Vec::new())
        }
        CheckResult::Mismatch(lines) => (
            topic.policy.on_mismatch,
            format!("deviates from baseline ({} lines changed)", lines.len()),
            lines,
        ),
        CheckResult::Failed { observed, evidence } => {
            (topic.policy.on_mismatch, observed, evidence)
        }
        CheckResult::NoBaseline => (
            absence_severity(topic),
            "no baseline snapshot saved; check skipped (promote a capture to enable it)"
                .to_string(),
            Vec::new(),
        ),
        CheckResult::NoData(reason) => {
            (absence_severity(topic), format!("check skipped: {reason}"), Vec::new())
        }
        CheckResult::Skipped(reason) => (Severity::Info, reason, Vec::new()),
    };

    CheckOutcome {
        topic: topic.key.to_string(),
        label: topic.label.to_string(),
        severity,
        message,
        evidence,
    }
}

/// The topic's absence severity, capped below `Error`.
fn absence_severity(topic: &Topic) -> Severity {
    topic.policy.on_missing.min(Severity::Warning)
}
