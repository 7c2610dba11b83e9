//! Audit topics and their per-topic severity policy.

use crate::compare::predicate::ThresholdSpec;
use crate::normalize::Normalizer;

use super::outcome::Severity;

/// How a topic is evaluated.
#[derive(Debug, Clone)]
pub enum CheckKind {
    /// Compare the normalized current capture against the saved snapshot.
    Snapshot {
        /// Canonicalization applied to both sides before the diff.
        normalizer: Normalizer,
    },
    /// Evaluate a scalar predicate against a policy threshold.
    Predicate(ThresholdSpec),
}

/// Severity policy for one topic.
///
/// Centralizes what used to be scattered conditionals: which outcomes
/// count as warnings, which as errors, and which checks gate the rest
/// of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicPolicy {
    /// Severity of a mismatch or failed predicate.
    pub on_mismatch: Severity,
    /// Severity when the baseline or the fact itself is absent.
    /// Never `Error`: "not configured" is not "broken".
    pub on_missing: Severity,
    /// Failure invalidates the rest of the run.
    pub fatal: bool,
    /// Always pause for acknowledgment on a finding, regardless of
    /// global stop flags.
    pub force_ack: bool,
}

impl TopicPolicy {
    /// Mismatch is an error, absence is a warning.
    #[must_use]
    pub const fn hard() -> Self {
        Self {
            on_mismatch: Severity::Error,
            on_missing: Severity::Warning,
            fatal: false,
            force_ack: false,
        }
    }

    /// Mismatch is only a warning, absence is informational.
    #[must_use]
    pub const fn soft() -> Self {
        Self {
            on_mismatch: Severity::Warning,
            on_missing: Severity::Info,
            fatal: false,
            force_ack: false,
        }
    }

    /// Mark this topic as a prerequisite for the rest of the run.
    #[must_use]
    pub const fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// Require acknowledgment on any finding.
    #[must_use]
    pub const fn force_ack(mut self) -> Self {
        self.force_ack = true;
        self
    }

    /// Override the absence severity.
    #[must_use]
    pub const fn missing(mut self, severity: Severity) -> Self {
        self.on_missing = severity;
        self
    }
}

/// One named audit unit: key, label, evaluation kind, policy.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Stable identifier; also the baseline file stem.
    pub key: &'static str,
    /// Human label for console output.
    pub label: &'static str,
    /// How the topic is evaluated.
    pub kind: CheckKind,
    /// Severity policy.
    pub policy: TopicPolicy,
    /// Collector is slow (spins up disks, probes hardware); skipped
    /// when the policy says so.
    pub expensive: bool,
}

impl Topic {
    /// Snapshot-comparison topic.
    #[must_use]
    pub fn snapshot(
        key: &'static str,
        label: &'static str,
        normalizer: Normalizer,
        policy: TopicPolicy,
    ) -> Self {
        Self {
            key,
            label,
            kind: CheckKind::Snapshot { normalizer },
            policy,
            expensive: false,
        }
    }

    /// Predicate topic.
    #[must_use]
    pub fn predicate(
        key: &'static str,
        label: &'static str,
        spec: ThresholdSpec,
        policy: TopicPolicy,
    ) -> Self {
        Self {
            key,
            label,
            kind: CheckKind::Predicate(spec),
            policy,
            expensive: false,
        }
    }

    /// Mark the collector as expensive.
    #[must_use]
    pub fn expensive(mut self) -> Self {
        self.expensive = true;
        self
    }

    /// True when evaluation needs a saved baseline snapshot.
    #[must_use]
    pub const fn requires_baseline(&self) -> bool {
        matches!(self.kind, CheckKind::Snapshot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_builders_compose() {
        let policy = TopicPolicy::hard().fatal().force_ack();
        assert_eq!(policy.on_mismatch, Severity::Error);
        assert!(policy.fatal);
        assert!(policy.force_ack);

        let soft = TopicPolicy::soft();
        assert_eq!(soft.on_mismatch, Severity::Warning);
        assert_eq!(soft.on_missing, Severity::Info);
        assert!(!soft.fatal);
    }
}
