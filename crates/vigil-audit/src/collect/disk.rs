//! Disk health and capacity facts.

use std::process::Command;

use super::run_tool;
use crate::types::RawFact;

/// SMART overall-health verdict for the policy device, e.g. `PASSED`.
///
/// smartctl signals problems through exit status bits, so its output is
/// read regardless of exit code.
pub fn smart_health(device: &str) -> RawFact {
    let Ok(output) = Command::new("smartctl").args(["-H", device]).output() else {
        return RawFact::Missing;
    };

    let text = String::from_utf8_lossy(&output.stdout);
    for line in text.lines() {
        let lower = line.to_ascii_lowercase();
        if lower.contains("overall-health") || lower.contains("smart health status") {
            if let Some((_, verdict)) = line.rsplit_once(':') {
                return RawFact::Status(verdict.trim().to_string());
            }
        }
    }
    RawFact::Missing
}

/// Filesystem usage percentage for a mount point, from `df -P`.
pub fn usage_percent(mount: &str) -> RawFact {
    let Some(out) = run_tool("df", &["-P", mount]) else {
        return RawFact::Missing;
    };

    // POSIX format: last line, fifth column is `N%`.
    out.lines()
        .last()
        .and_then(|line| line.split_whitespace().nth(4))
        .and_then(|field| field.trim_end_matches('%').parse::<u64>().ok())
        .map_or(RawFact::Missing, RawFact::Count)
}
