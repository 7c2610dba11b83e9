//! Startup mechanisms -- enabled units and cron entries.

use std::fs;
use std::process::Command;

use super::run_tool;
use crate::types::RawFact;

/// Enabled systemd unit files, one `unit state` line each.
pub fn enabled_units() -> RawFact {
    run_tool(
        "systemctl",
        &["list-unit-files", "--state=enabled", "--no-legend", "--plain"],
    )
    .map_or(RawFact::Missing, RawFact::Text)
}

/// User crontab plus the system crontab, concatenated.
///
/// `crontab -l` exits nonzero when the user simply has no crontab;
/// that is an empty observation, not an absent source.
pub fn cron_entries() -> RawFact {
    let user = match Command::new("crontab").arg("-l").output() {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).into_owned()
        }
        Ok(_) => String::new(),
        Err(_) => {
            // No crontab tool at all: fall back to the system table alone.
            return fs::read_to_string("/etc/crontab")
                .map_or(RawFact::Missing, RawFact::Text);
        }
    };

    let system = fs::read_to_string("/etc/crontab").unwrap_or_default();
    RawFact::Text(format!("{user}\n{system}"))
}
