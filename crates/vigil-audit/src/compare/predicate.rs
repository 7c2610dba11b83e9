//! Scalar predicate evaluation against policy thresholds.

use regex::Regex;

use crate::types::RawFact;

/// Threshold specification for predicate topics.
#[derive(Debug, Clone)]
pub enum ThresholdSpec {
    /// Count must be at least this value.
    MinCount(u64),
    /// Count must be at most this value.
    MaxCount(u64),
    /// Status token must equal one of the allowed values.
    EqualsAny(Vec<String>),
    /// Text must contain a match for the pattern.
    RegexMatch(Regex),
    /// Text must contain no match for the pattern.
    RegexNotMatch(Regex),
    /// Timestamp age must not exceed this many days.
    NotOlderThanDays(i64),
    /// Part/total ratio, as a truncated integer percentage, must be at
    /// least this value.
    MinRatioPercent(u64),
}

/// Verdict of a predicate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Predicate holds.
    Pass,
    /// Predicate does not hold.
    Fail,
    /// No usable data -- tool absent, empty denominator, or a fact of
    /// the wrong shape for this spec. A defined outcome, never a fault.
    NoData,
}

/// Verdict plus what the operator should see about it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Pass / fail / no data.
    pub verdict: Verdict,
    /// Short description of the observed value.
    pub observed: String,
    /// Lines backing a failure (e.g. forbidden matches).
    pub evidence: Vec<String>,
}

impl Evaluation {
    fn pass(observed: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Pass,
            observed: observed.into(),
            evidence: Vec::new(),
        }
    }

    fn fail(observed: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Fail,
            observed: observed.into(),
            evidence: Vec::new(),
        }
    }

    fn fail_with(observed: impl Into<String>, evidence: Vec<String>) -> Self {
        Self {
            verdict: Verdict::Fail,
            observed: observed.into(),
            evidence,
        }
    }

    fn no_data(observed: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::NoData,
            observed: observed.into(),
            evidence: Vec::new(),
        }
    }
}

/// Evaluate a collected fact against a threshold spec.
///
/// Shape mismatches (e.g. a text blob fed to a count threshold) resolve
/// to [`Verdict::NoData`] rather than panicking; the topic table is
/// what keeps facts and specs paired up.
#[must_use]
pub fn evaluate(fact: &RawFact, spec: &ThresholdSpec) -> Evaluation {
    if fact.is_missing() {
        return Evaluation::no_data("source unavailable");
    }

    match (spec, fact) {
        (ThresholdSpec::MinCount(min), RawFact::Count(n)) => {
            if n >= min {
                Evaluation::pass(format!("{n} (minimum {min})"))
            } else {
                Evaluation::fail(format!("{n}, expected at least {min}"))
            }
        }
        (ThresholdSpec::MinCount(min), RawFact::Ratio { part, .. }) => {
            if part >= min {
                Evaluation::pass(format!("{part} (minimum {min})"))
            } else {
                Evaluation::fail(format!("{part}, expected at least {min}"))
            }
        }
        (ThresholdSpec::MaxCount(max), RawFact::Count(n)) => {
            if n <= max {
                Evaluation::pass(format!("{n} (maximum {max})"))
            } else {
                Evaluation::fail(format!("{n}, expected at most {max}"))
            }
        }
        (ThresholdSpec::EqualsAny(allowed), RawFact::Status(s) | RawFact::Text(s)) => {
            if allowed.is_empty() {
                return Evaluation::no_data("no expected values configured");
            }
            let token = s.trim();
            if allowed.iter().any(|v| v == token) {
                Evaluation::pass(format!("'{token}'"))
            } else {
                Evaluation::fail(format!(
                    "'{token}', expected one of [{}]",
                    allowed.join(", ")
                ))
            }
        }
        (ThresholdSpec::EqualsAny(allowed), RawFact::Flag(flag)) => {
            if allowed.is_empty() {
                return Evaluation::no_data("no expected values configured");
            }
            let token = if *flag { "true" } else { "false" };
            if allowed.iter().any(|v| v == token) {
                Evaluation::pass(format!("'{token}'"))
            } else {
                Evaluation::fail(format!(
                    "'{token}', expected one of [{}]",
                    allowed.join(", ")
                ))
            }
        }
        (ThresholdSpec::RegexMatch(pattern), RawFact::Text(t) | RawFact::Status(t)) => {
            if pattern.is_match(t) {
                Evaluation::pass(format!("matched /{pattern}/"))
            } else {
                Evaluation::fail(format!("no match for /{pattern}/"))
            }
        }
        (ThresholdSpec::RegexNotMatch(pattern), RawFact::Text(t) | RawFact::Status(t)) => {
            let hits: Vec<String> = t
                .lines()
                .filter(|line| pattern.is_match(line))
                .map(String::from)
                .collect();
            if hits.is_empty() {
                Evaluation::pass(format!("no match for /{pattern}/"))
            } else {
                Evaluation::fail_with(format!("{} unexpected entries", hits.len()), hits)
            }
        }
        (ThresholdSpec::NotOlderThanDays(max), RawFact::AgeDays(age)) => {
            if age <= max {
                Evaluation::pass(format!("{age} days old (maximum {max})"))
            } else {
                Evaluation::fail(format!("{age} days old, expected at most {max}"))
            }
        }
        (ThresholdSpec::MinRatioPercent(min), RawFact::Ratio { part, total }) => {
            // Integer percentage, truncating toward zero. A zero
            // denominator means there is nothing to measure.
            if *total == 0 {
                Evaluation::no_data("no entries to measure")
            } else {
                let percent = part * 100 / total;
                if percent >= *min {
                    Evaluation::pass(format!("{part}/{total} ({percent}%, minimum {min}%)"))
                } else {
                    Evaluation::fail(format!(
                        "{part}/{total} ({percent}%), expected at least {min}%"
                    ))
                }
            }
        }
        (spec, fact) => {
            tracing::debug!(?spec, ?fact, "fact shape does not fit threshold spec");
            Evaluation::no_data("unexpected fact shape")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn min_count_boundary() {
        let spec = ThresholdSpec::MinCount(3);
        assert_eq!(evaluate(&RawFact::Count(3), &spec).verdict, Verdict::Pass);
        assert_eq!(evaluate(&RawFact::Count(2), &spec).verdict, Verdict::Fail);
    }

    #[test]
    fn max_count_boundary() {
        let spec = ThresholdSpec::MaxCount(85);
        assert_eq!(evaluate(&RawFact::Count(85), &spec).verdict, Verdict::Pass);
        assert_eq!(evaluate(&RawFact::Count(86), &spec).verdict, Verdict::Fail);
    }

    #[test]
    fn equals_any_trims_and_compares() {
        let spec = ThresholdSpec::EqualsAny(vec!["active".into()]);
        assert_eq!(
            evaluate(&RawFact::Status("active\n".into()), &spec).verdict,
            Verdict::Pass
        );
        assert_eq!(
            evaluate(&RawFact::Status("inactive".into()), &spec).verdict,
            Verdict::Fail
        );
    }

    #[test]
    fn regex_must_match() {
        let spec = ThresholdSpec::RegexMatch(re("PASSED|OK"));
        assert_eq!(
            evaluate(&RawFact::Text("overall-health: PASSED".into()), &spec).verdict,
            Verdict::Pass
        );
        assert_eq!(
            evaluate(&RawFact::Text("overall-health: FAILED".into()), &spec).verdict,
            Verdict::Fail
        );
    }

    #[test]
    fn regex_must_not_match_reports_hits() {
        let spec = ThresholdSpec::RegexNotMatch(re("telnet|rsh"));
        let eval = evaluate(&RawFact::Text("openssh\ntelnet\nvim".into()), &spec);
        assert_eq!(eval.verdict, Verdict::Fail);
        assert_eq!(eval.evidence, vec!["telnet".to_string()]);
    }

    #[test]
    fn staleness_boundary() {
        let spec = ThresholdSpec::NotOlderThanDays(45);
        assert_eq!(evaluate(&RawFact::AgeDays(45), &spec).verdict, Verdict::Pass);
        assert_eq!(evaluate(&RawFact::AgeDays(50), &spec).verdict, Verdict::Fail);
    }

    #[test]
    fn ratio_truncates_toward_zero() {
        let spec = ThresholdSpec::MinRatioPercent(50);
        // 2/3 = 66.6% -> 66
        assert_eq!(
            evaluate(&RawFact::Ratio { part: 2, total: 3 }, &spec).verdict,
            Verdict::Pass
        );
        // 49.9% truncates to 49 -> fail
        assert_eq!(
            evaluate(&RawFact::Ratio { part: 499, total: 1000 }, &spec).verdict,
            Verdict::Fail
        );
    }

    #[test]
    fn zero_denominator_is_no_data_not_a_fault() {
        let spec = ThresholdSpec::MinRatioPercent(50);
        let eval = evaluate(&RawFact::Ratio { part: 0, total: 0 }, &spec);
        assert_eq!(eval.verdict, Verdict::NoData);
    }

    #[test]
    fn missing_fact_is_no_data() {
        let spec = ThresholdSpec::MinCount(1);
        assert_eq!(evaluate(&RawFact::Missing, &spec).verdict, Verdict::NoData);
    }

    #[test]
    fn unconfigured_equals_any_is_no_data() {
        let spec = ThresholdSpec::EqualsAny(Vec::new());
        assert_eq!(
            evaluate(&RawFact::Status("anything".into()), &spec).verdict,
            Verdict::NoData
        );
    }

    #[test]
    fn shape_mismatch_is_no_data() {
        let spec = ThresholdSpec::MinCount(1);
        assert_eq!(
            evaluate(&RawFact::Text("blob".into()), &spec).verdict,
            Verdict::NoData
        );
    }
}
