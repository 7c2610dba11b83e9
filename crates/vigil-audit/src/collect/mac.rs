//! Mandatory-access-control enforcement (AppArmor).

use super::run_tool;
use crate::types::RawFact;

/// Loaded vs enforced AppArmor profile counts from `aa-status`.
///
/// `aa-status` needs root to enumerate profiles; without privileges it
/// exits nonzero and the fact degrades to `Missing`. A system with the
/// tool but zero loaded profiles yields a zero denominator, which the
/// predicate layer treats as "nothing to measure".
pub fn apparmor_enforcement() -> RawFact {
    let Some(out) = run_tool("aa-status", &[]) else {
        return RawFact::Missing;
    };

    let total = leading_count(&out, "profiles are loaded");
    let enforced = leading_count(&out, "profiles are in enforce mode");
    match (total, enforced) {
        (Some(total), Some(part)) => RawFact::Ratio { part, total },
        _ => RawFact::Missing,
    }
}

/// Extract the leading number of the line containing `marker`.
fn leading_count(text: &str, marker: &str) -> Option<u64> {
    text.lines()
        .find(|line| line.contains(marker))?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}
