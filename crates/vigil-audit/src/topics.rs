//! The fixed, ordered audit topic table.
//!
//! This is the single place that says what gets checked, how each fact
//! is canonicalized, and how hard each deviation hits. Checks run in
//! declaration order, so console output correlates one-to-one with this
//! list.

use regex::Regex;

use crate::compare::predicate::ThresholdSpec;
use crate::error::{AuditError, Result};
use crate::normalize::{Normalizer, Step};
use crate::policy::Policy;
use crate::types::{Topic, TopicPolicy};

/// Connectivity prerequisite; gates the rest of the run.
pub const NETWORK_REACHABLE: &str = "network-reachable";
/// Operator `PATH` expectation.
pub const PATH_ENV: &str = "path-env";
/// Login-capable accounts snapshot.
pub const LOGIN_ACCOUNTS: &str = "login-accounts";
/// Administrative group membership snapshot.
pub const ADMIN_GROUP: &str = "admin-group";
/// Firewall state token.
pub const FIREWALL_ENABLED: &str = "firewall-enabled";
/// Firewall rule listing snapshot.
pub const FIREWALL_RULES: &str = "firewall-rules";
/// Listening TCP socket snapshot.
pub const LISTENING_SOCKETS: &str = "listening-sockets";
/// MAC profile enforcement ratio.
pub const MAC_ENFORCEMENT: &str = "mac-enforcement";
/// SMART overall-health verdict.
pub const DISK_SMART_HEALTH: &str = "disk-smart-health";
/// Root filesystem usage percentage.
pub const DISK_USAGE: &str = "disk-usage";
/// Package repository configuration snapshot.
pub const PACKAGE_REPOSITORIES: &str = "package-repositories";
/// Package metadata refresh age.
pub const PACKAGE_REFRESH: &str = "package-refresh-staleness";
/// Expected-program presence.
pub const EXPECTED_PROGRAMS: &str = "expected-programs";
/// Discouraged-program absence.
pub const DISCOURAGED_PROGRAMS: &str = "discouraged-programs";
/// Enabled startup service snapshot.
pub const STARTUP_SERVICES: &str = "startup-services";
/// Cron entry snapshot.
pub const CRON_ENTRIES: &str = "cron-entries";
/// Browser policy snapshot.
pub const BROWSER_POLICY: &str = "browser-policy";

/// Build the default topic list for a policy.
///
/// Fails only when a policy-supplied pattern does not compile.
pub fn default_topics(policy: &Policy) -> Result<Vec<Topic>> {
    let discouraged = discouraged_pattern(&policy.discouraged_programs)?;

    Ok(vec![
        Topic::predicate(
            NETWORK_REACHABLE,
            "Network reachability",
            ThresholdSpec::EqualsAny(vec!["true".to_string()]),
            TopicPolicy::hard().fatal().force_ack(),
        ),
        Topic::predicate(
            PATH_ENV,
            "Operator PATH",
            ThresholdSpec::EqualsAny(policy.expected_paths.clone()),
            TopicPolicy::hard(),
        ),
        Topic::snapshot(
            LOGIN_ACCOUNTS,
            "Login-capable accounts",
            Normalizer::new(vec![Step::TrimLines, Step::SortLines]),
            TopicPolicy::hard(),
        ),
        Topic::snapshot(
            ADMIN_GROUP,
            "Administrative group members",
            Normalizer::new(vec![Step::TrimLines, Step::SortLines]),
            TopicPolicy::hard(),
        ),
        Topic::predicate(
            FIREWALL_ENABLED,
            "Firewall state",
            ThresholdSpec::EqualsAny(vec!["active".to_string()]),
            TopicPolicy::hard(),
        ),
        Topic::snapshot(
            FIREWALL_RULES,
            "Firewall rules",
            Normalizer::new(vec![
                Step::TrimLines,
                Step::DropMatching(noise(r"^Status:")?),
                // nftables counters tick on every packet
                Step::ReplaceAll(noise(r"counter packets \d+ bytes \d+")?, "counter".to_string()),
                Step::SortLines,
            ]),
            TopicPolicy::hard(),
        ),
        Topic::snapshot(
            LISTENING_SOCKETS,
            "Listening sockets",
            Normalizer::new(vec![
                Step::TrimLines,
                // receive/send queue depths are per-moment noise
                Step::ReplaceAll(noise(r"\b(LISTEN|UNCONN)\s+\d+\s+\d+")?, "$1".to_string()),
                Step::SortLines,
            ]),
            TopicPolicy::soft(),
        ),
        Topic::predicate(
            MAC_ENFORCEMENT,
            "MAC profile enforcement",
            ThresholdSpec::MinRatioPercent(policy.min_enforced_percent),
            TopicPolicy::soft(),
        ),
        Topic::predicate(
            DISK_SMART_HEALTH,
            "Disk SMART health",
            ThresholdSpec::RegexMatch(noise(r"PASSED|OK")?),
            TopicPolicy::hard(),
        )
        .expensive(),
        Topic::predicate(
            DISK_USAGE,
            "Root filesystem usage",
            ThresholdSpec::MaxCount(policy.max_disk_usage_percent),
            TopicPolicy::soft(),
        ),
        Topic::snapshot(
            PACKAGE_REPOSITORIES,
            "Package repositories",
            Normalizer::new(vec![
                Step::TrimLines,
                Step::DropMatching(noise(r"^#")?),
                Step::SortLines,
            ]),
            TopicPolicy::hard(),
        ),
        Topic::predicate(
            PACKAGE_REFRESH,
            "Package metadata freshness",
            ThresholdSpec::NotOlderThanDays(policy.max_refresh_age_days),
            TopicPolicy::soft(),
        ),
        Topic::predicate(
            EXPECTED_PROGRAMS,
            "Expected programs present",
            // the fact is the list of missing programs; any content fails
            ThresholdSpec::RegexNotMatch(noise(r"\S")?),
            TopicPolicy::soft(),
        ),
        Topic::predicate(
            DISCOURAGED_PROGRAMS,
            "Discouraged programs absent",
            ThresholdSpec::RegexNotMatch(discouraged),
            TopicPolicy::soft(),
        ),
        Topic::snapshot(
            STARTUP_SERVICES,
            "Enabled startup services",
            Normalizer::new(vec![Step::TrimLines, Step::KeepFields(2), Step::SortLines]),
            TopicPolicy::hard(),
        ),
        Topic::snapshot(
            CRON_ENTRIES,
            "Scheduled cron entries",
            Normalizer::new(vec![
                Step::TrimLines,
                Step::DropMatching(noise(r"^#")?),
                Step::SortLines,
            ]),
            TopicPolicy::soft(),
        ),
        Topic::snapshot(
            BROWSER_POLICY,
            "Browser policy preferences",
            Normalizer::new(vec![Step::TrimLines, Step::MaskDigits, Step::SortLines]),
            TopicPolicy::soft(),
        ),
    ])
}

/// Compile a fixed table pattern.
fn noise(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AuditError::pattern("topic-table", e))
}

/// Alternation over the policy's discouraged-program patterns.
fn discouraged_pattern(patterns: &[String]) -> Result<Regex> {
    if patterns.is_empty() {
        // nothing configured forbids nothing; this pattern cannot match
        return Regex::new(r"[^\s\S]")
            .map_err(|e| AuditError::pattern(DISCOURAGED_PROGRAMS, e));
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&joined).map_err(|e| AuditError::pattern(DISCOURAGED_PROGRAMS, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckKind;

    #[test]
    fn table_is_stable_and_keys_are_unique() {
        let policy = Policy::default();
        let topics = default_topics(&policy).unwrap();
        assert_eq!(topics.len(), 17);

        let mut keys: Vec<&str> = topics.iter().map(|t| t.key).collect();
        let ordered = keys.clone();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), topics.len(), "duplicate topic keys");

        // declaration order is part of the contract
        assert_eq!(ordered.first(), Some(&NETWORK_REACHABLE));
        assert_eq!(ordered.last(), Some(&BROWSER_POLICY));
    }

    #[test]
    fn only_the_connectivity_check_is_fatal() {
        let topics = default_topics(&Policy::default()).unwrap();
        let fatal: Vec<&str> = topics
            .iter()
            .filter(|t| t.policy.fatal)
            .map(|t| t.key)
            .collect();
        assert_eq!(fatal, vec![NETWORK_REACHABLE]);
    }

    #[test]
    fn every_registered_normalizer_is_idempotent() {
        let samples = [
            "",
            "plain line",
            "# comment\n  spaced   line  \n\nStatus: active\n22/tcp ALLOW Anywhere",
            "LISTEN 0 128 0.0.0.0:22\nUNCONN 0 0 0.0.0.0:68",
            "sshd.service enabled enabled\ncups.service enabled disabled",
            "5 4 * * * /usr/local/bin/job\ncounter packets 410 bytes 52013",
            "lockPref(\"app.update.lastUpdateTime\", 1690000000);",
        ];

        let topics = default_topics(&Policy::default()).unwrap();
        for topic in &topics {
            let CheckKind::Snapshot { normalizer } = &topic.kind else {
                continue;
            };
            for sample in samples {
                let once = normalizer.apply(sample);
                let twice = normalizer.apply(&once);
                assert_eq!(once, twice, "normalizer for {} is not idempotent", topic.key);
            }
        }
    }

    #[test]
    fn empty_discouraged_list_forbids_nothing() {
        let pattern = discouraged_pattern(&[]).unwrap();
        assert!(!pattern.is_match("telnet"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn discouraged_alternation_matches_each_entry() {
        let pattern =
            discouraged_pattern(&["^telnet".to_string(), "^rsh".to_string()]).unwrap();
        assert!(pattern.is_match("telnet"));
        assert!(pattern.is_match("rsh-client"));
        assert!(!pattern.is_match("openssh"));
    }
}
