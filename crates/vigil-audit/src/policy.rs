//! Static audit policy -- thresholds, expectations, stop flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};

/// Fixed configuration for one audit run.
///
/// Read once at startup; checks never mutate it. Every field has a
/// sensible default so the auditor is usable with no config file at
/// all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Directory holding baseline snapshots, one file pair per topic.
    pub baseline_dir: PathBuf,

    /// Host probed by the connectivity prerequisite.
    pub probe_host: String,

    /// Device checked for SMART health.
    pub smart_device: String,

    /// Acceptable values for the operator `PATH`.
    pub expected_paths: Vec<String>,

    /// Programs that must resolve on `PATH`.
    pub expected_programs: Vec<String>,

    /// Installed-package names that should not be present (regex
    /// alternatives, matched per line of the package list).
    pub discouraged_programs: Vec<String>,

    /// Minimum percentage of MAC profiles in enforce mode.
    pub min_enforced_percent: u64,

    /// Maximum acceptable root filesystem usage, percent.
    pub max_disk_usage_percent: u64,

    /// Maximum age of the package-metadata refresh, days.
    pub max_refresh_age_days: i64,

    /// Pause for acknowledgment on warnings.
    pub stop_on_warning: bool,

    /// Pause for acknowledgment on errors.
    pub stop_on_error: bool,

    /// Skip collectors that are slow or spin up hardware.
    pub skip_expensive: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            baseline_dir: PathBuf::from("/var/lib/vigil/baseline"),
            probe_host: "1.1.1.1".to_string(),
            smart_device: "/dev/sda".to_string(),
            expected_paths: vec![
                "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin".to_string(),
                "/usr/local/bin:/usr/bin:/bin".to_string(),
            ],
            expected_programs: Vec::new(),
            discouraged_programs: vec![
                "^telnet".to_string(),
                "^rsh".to_string(),
                "^rlogin".to_string(),
                "^tftp".to_string(),
            ],
            min_enforced_percent: 50,
            max_disk_usage_percent: 85,
            max_refresh_age_days: 45,
            stop_on_warning: false,
            stop_on_error: false,
            skip_expensive: false,
        }
    }
}

impl Policy {
    /// Sanity-check the numeric fields.
    pub fn validate(&self) -> Result<()> {
        if self.min_enforced_percent > 100 {
            return Err(AuditError::Policy(format!(
                "min_enforced_percent must be 0..=100, got {}",
                self.min_enforced_percent
            )));
        }
        if self.max_disk_usage_percent > 100 {
            return Err(AuditError::Policy(format!(
                "max_disk_usage_percent must be 0..=100, got {}",
                self.max_disk_usage_percent
            )));
        }
        if self.max_refresh_age_days < 0 {
            return Err(AuditError::Policy(format!(
                "max_refresh_age_days must not be negative, got {}",
                self.max_refresh_age_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Policy::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        let policy = Policy {
            max_disk_usage_percent: 120,
            ..Policy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn policy_round_trips_through_toml_shaped_json() {
        let policy = Policy::default();
        let json = serde_json::to_string(&policy).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_refresh_age_days, policy.max_refresh_age_days);
        assert_eq!(back.expected_paths, policy.expected_paths);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let partial: Policy = serde_json::from_str("{\"stop_on_error\": true}").unwrap();
        assert!(partial.stop_on_error);
        assert_eq!(
            partial.max_disk_usage_percent,
            Policy::default().max_disk_usage_percent
        );
    }
}
