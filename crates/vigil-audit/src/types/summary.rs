//! Aggregate state for one audit invocation.

use serde::{Deserialize, Serialize};

use super::outcome::{CheckOutcome, Severity};

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "reason")]
pub enum RunState {
    /// Every topic was evaluated.
    Completed,
    /// A prerequisite check failed; remaining topics were not run.
    Aborted(String),
}

/// Append-only record of all outcomes and counts for one invocation.
///
/// Owned exclusively by the orchestrator; [`RunSummary::record`] is the
/// only mutation path, so the counters can never drift from the outcome
/// list. Safe to inspect mid-run: totals are always consistent with the
/// outcomes appended so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Outcomes in check order.
    pub outcomes: Vec<CheckOutcome>,
    /// Number of outcomes with severity `Warning`.
    pub warnings: usize,
    /// Number of outcomes with severity `Error`.
    pub errors: usize,
    /// How the run ended.
    pub state: RunState,
}

impl RunSummary {
    /// Fresh summary at run start.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            warnings: 0,
            errors: 0,
            state: RunState::Completed,
        }
    }

    /// Append an outcome and bump the matching counter.
    pub fn record(&mut self, outcome: CheckOutcome) {
        match outcome.severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
            Severity::Success | Severity::Info => {}
        }
        self.outcomes.push(outcome);
    }

    /// Mark the run as aborted by a failed prerequisite.
    pub fn abort(&mut self, reason: impl Into<String>) {
        self.state = RunState::Aborted(reason.into());
    }

    /// True when the run completed with no warnings and no errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0 && self.state == RunState::Completed
    }

    /// True when the run was cut short by a prerequisite failure.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self.state, RunState::Aborted(_))
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(severity: Severity) -> CheckOutcome {
        CheckOutcome {
            topic: "t".into(),
            label: "t".into(),
            severity,
            message: String::new(),
            evidence: Vec::new(),
        }
    }

    #[test]
    fn counters_track_recorded_outcomes() {
        let mut summary = RunSummary::new();
        summary.record(outcome(Severity::Success));
        summary.record(outcome(Severity::Info));
        summary.record(outcome(Severity::Warning));
        summary.record(outcome(Severity::Error));
        summary.record(outcome(Severity::Error));

        assert_eq!(summary.outcomes.len(), 5);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.errors, 2);

        let warn_count = summary
            .outcomes
            .iter()
            .filter(|o| o.severity == Severity::Warning)
            .count();
        let error_count = summary
            .outcomes
            .iter()
            .filter(|o| o.severity == Severity::Error)
            .count();
        assert_eq!(summary.warnings, warn_count);
        assert_eq!(summary.errors, error_count);
    }

    #[test]
    fn clean_run_has_no_findings() {
        let mut summary = RunSummary::new();
        summary.record(outcome(Severity::Success));
        assert!(summary.is_clean());

        summary.record(outcome(Severity::Warning));
        assert!(!summary.is_clean());
    }

    #[test]
    fn aborted_run_is_never_clean() {
        let mut summary = RunSummary::new();
        summary.record(outcome(Severity::Success));
        summary.abort("connectivity check failed");
        assert!(summary.is_aborted());
        assert!(!summary.is_clean());
    }
}
