//! Check outcomes and their severities.

use serde::{Deserialize, Serialize};

/// Severity of a single check outcome.
///
/// Ordered: `Success < Info < Warning < Error`, so thresholds can be
/// expressed with plain comparisons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Check passed.
    Success,
    /// Neutral note, nothing to act on.
    Info,
    /// Deviation the operator should look at.
    Warning,
    /// Deviation that must be fixed.
    Error,
}

impl Severity {
    /// Short console tag for this severity.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Success => " ok ",
            Self::Info => "info",
            Self::Warning => "WARN",
            Self::Error => "FAIL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{name}")
    }
}

/// Result of evaluating one topic in one run.
///
/// Created once per check, then immutable; consumed by the run summary
/// and the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Stable topic key.
    pub topic: String,
    /// Human label for console output.
    pub label: String,
    /// Classified severity.
    pub severity: Severity,
    /// One-line description of what was found.
    pub message: String,
    /// Supporting lines: diff hunks or matched entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Success < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
