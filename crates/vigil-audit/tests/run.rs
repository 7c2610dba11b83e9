//! End-to-end orchestrator behavior over a canned fact source.

use std::collections::HashMap;

use tempfile::TempDir;

use vigil_audit::compare::predicate::ThresholdSpec;
use vigil_audit::normalize::{Normalizer, Step};
use vigil_audit::runner::{run_audit, AuditGate};
use vigil_audit::{
    BaselineStore, CheckOutcome, FactSource, Policy, RawFact, RunState, Severity, Topic,
    TopicPolicy,
};

/// Fact source with fixed answers; anything unlisted is `Missing`.
struct CannedFacts(HashMap<&'static str, RawFact>);

impl CannedFacts {
    fn new(entries: &[(&'static str, RawFact)]) -> Self {
        Self(entries.iter().cloned().collect())
    }
}

impl FactSource for CannedFacts {
    fn collect(&self, topic: &str, _policy: &Policy) -> RawFact {
        self.0.get(topic).cloned().unwrap_or(RawFact::Missing)
    }
}

/// Gate that records what it was shown.
#[derive(Default)]
struct RecordingGate {
    seen: Vec<(String, Severity, bool)>,
}

impl AuditGate for RecordingGate {
    fn on_outcome(&mut self, outcome: &CheckOutcome, pause: bool) {
        self.seen.push((outcome.topic.clone(), outcome.severity, pause));
    }
}

fn sorted_snapshot_topic(key: &'static str, policy: TopicPolicy) -> Topic {
    Topic::snapshot(
        key,
        key,
        Normalizer::new(vec![Step::TrimLines, Step::SortLines]),
        policy,
    )
}

#[test]
fn passing_predicate_is_success_and_counts_stay_zero() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![Topic::predicate(
        "firewall-enabled",
        "Firewall state",
        ThresholdSpec::EqualsAny(vec!["active".to_string()]),
        TopicPolicy::hard(),
    )];
    let facts = CannedFacts::new(&[("firewall-enabled", RawFact::Status("active".into()))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].severity, Severity::Success);
    assert_eq!(summary.warnings, 0);
    assert_eq!(summary.errors, 0);
    assert!(summary.is_clean());
}

#[test]
fn snapshot_mismatch_on_hard_topic_is_one_error_with_diff_evidence() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    std::fs::write(dir.path().join("repository-list.saved"), "X\nY").unwrap();

    let policy = Policy::default();
    let topics = vec![sorted_snapshot_topic("repository-list", TopicPolicy::hard())];
    let facts = CannedFacts::new(&[("repository-list", RawFact::Text("X\nZ".into()))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    let outcome = &summary.outcomes[0];
    assert_eq!(outcome.severity, Severity::Error);
    assert_eq!(outcome.evidence, vec!["-Y".to_string(), "+Z".to_string()]);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.warnings, 0);
}

#[test]
fn stale_refresh_on_soft_topic_is_one_warning() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![Topic::predicate(
        "package-refresh-staleness",
        "Package metadata freshness",
        ThresholdSpec::NotOlderThanDays(45),
        TopicPolicy::soft(),
    )];
    let facts =
        CannedFacts::new(&[("package-refresh-staleness", RawFact::AgeDays(50))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes[0].severity, Severity::Warning);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.errors, 0);
}

#[test]
fn failed_prerequisite_aborts_remaining_checks() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![
        Topic::predicate(
            "network-reachable",
            "Network reachability",
            ThresholdSpec::EqualsAny(vec!["true".to_string()]),
            TopicPolicy::hard().fatal().force_ack(),
        ),
        sorted_snapshot_topic("never-reached", TopicPolicy::hard()),
    ];
    let facts = CannedFacts::new(&[
        ("network-reachable", RawFact::Flag(false)),
        ("never-reached", RawFact::Text("x".into())),
    ]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert!(summary.is_aborted());
    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].topic, "network-reachable");
    let RunState::Aborted(reason) = &summary.state else {
        panic!("expected aborted state");
    };
    assert!(reason.contains("Network reachability"));
    // the fatal outcome itself still pauses through force_ack
    assert!(gate.seen[0].2);
}

#[test]
fn non_fatal_failures_never_stop_later_checks() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![
        Topic::predicate(
            "broken-collector",
            "Broken collector",
            ThresholdSpec::MinCount(1),
            TopicPolicy::hard(),
        ),
        Topic::predicate(
            "disk-usage",
            "Root filesystem usage",
            ThresholdSpec::MaxCount(85),
            TopicPolicy::soft(),
        ),
    ];
    // first topic has no canned fact -> Missing -> absence outcome
    let facts = CannedFacts::new(&[("disk-usage", RawFact::Count(40))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.state, RunState::Completed);
    assert_eq!(summary.outcomes.len(), 2);
    assert!(summary.outcomes[0].severity <= Severity::Warning);
    assert_eq!(summary.outcomes[1].severity, Severity::Success);
}

#[test]
fn missing_baseline_is_reported_but_never_an_error() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![
        sorted_snapshot_topic("hard-snapshot", TopicPolicy::hard()),
        sorted_snapshot_topic("soft-snapshot", TopicPolicy::soft()),
    ];
    let facts = CannedFacts::new(&[
        ("hard-snapshot", RawFact::Text("a".into())),
        ("soft-snapshot", RawFact::Text("b".into())),
    ]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes[0].severity, Severity::Warning);
    assert_eq!(summary.outcomes[1].severity, Severity::Info);
    assert_eq!(summary.errors, 0);
}

#[test]
fn absent_baseline_directory_disables_snapshot_topics() {
    let store = BaselineStore::new("/nonexistent/vigil-test-baseline");
    let policy = Policy::default();

    let topics = vec![sorted_snapshot_topic("rules", TopicPolicy::hard())];
    let facts = CannedFacts::new(&[("rules", RawFact::Text("a".into()))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes[0].severity, Severity::Warning);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.state, RunState::Completed);
}

#[test]
fn zero_denominator_ratio_has_a_defined_non_error_outcome() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy::default();

    let topics = vec![Topic::predicate(
        "mac-enforcement",
        "MAC profile enforcement",
        ThresholdSpec::MinRatioPercent(50),
        TopicPolicy::soft(),
    )];
    let facts =
        CannedFacts::new(&[("mac-enforcement", RawFact::Ratio { part: 0, total: 0 })]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes.len(), 1);
    assert_ne!(summary.outcomes[0].severity, Severity::Error);
}

#[test]
fn stop_on_warning_pauses_exactly_the_warnings() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy {
        stop_on_warning: true,
        ..Policy::default()
    };

    let topics = vec![
        Topic::predicate(
            "ok-check",
            "ok",
            ThresholdSpec::MinCount(1),
            TopicPolicy::soft(),
        ),
        Topic::predicate(
            "warn-check",
            "warn",
            ThresholdSpec::MinCount(10),
            TopicPolicy::soft(),
        ),
    ];
    let facts = CannedFacts::new(&[
        ("ok-check", RawFact::Count(5)),
        ("warn-check", RawFact::Count(5)),
    ]);

    let mut gate = RecordingGate::default();
    run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(gate.seen.len(), 2);
    assert!(!gate.seen[0].2, "success must not pause");
    assert!(gate.seen[1].2, "warning must pause under stop-on-warning");
}

#[test]
fn identical_inputs_produce_identical_summaries() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    std::fs::write(dir.path().join("rules.saved"), "a\nb").unwrap();

    let policy = Policy::default();
    let topics = vec![
        sorted_snapshot_topic("rules", TopicPolicy::hard()),
        Topic::predicate(
            "disk-usage",
            "Root filesystem usage",
            ThresholdSpec::MaxCount(85),
            TopicPolicy::soft(),
        ),
    ];
    let facts = CannedFacts::new(&[
        ("rules", RawFact::Text("a\nc".into())),
        ("disk-usage", RawFact::Count(90)),
    ]);

    let mut gate = RecordingGate::default();
    let first = run_audit(&policy, &topics, &facts, &store, &mut gate);
    let second = run_audit(&policy, &topics, &facts, &store, &mut gate);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn skip_expensive_yields_an_info_outcome() {
    let dir = TempDir::new().unwrap();
    let store = BaselineStore::new(dir.path());
    let policy = Policy {
        skip_expensive: true,
        ..Policy::default()
    };

    let topics = vec![Topic::predicate(
        "disk-smart-health",
        "Disk SMART health",
        ThresholdSpec::MinCount(1),
        TopicPolicy::hard(),
    )
    .expensive()];
    // collector would pass, but must not even be consulted
    let facts = CannedFacts::new(&[("disk-smart-health", RawFact::Count(5))]);

    let mut gate = RecordingGate::default();
    let summary = run_audit(&policy, &topics, &facts, &store, &mut gate);

    assert_eq!(summary.outcomes[0].severity, Severity::Info);
    assert!(summary.is_clean());
}
