//! Fact collection -- thin wrappers over status tools and well-known files.
//!
//! Each collector produces the current value for one audit topic: a
//! scalar, a short status token, or a multi-line text blob. Collectors
//! never fail; a tool that is not installed, needs privileges we do not
//! have, or prints nothing usable becomes [`RawFact::Missing`] (or empty
//! text where "nothing" is itself a valid observation), and the
//! classifier decides what that absence means.

pub mod accounts;
pub mod browser;
pub mod disk;
pub mod environment;
pub mod firewall;
pub mod mac;
pub mod network;
pub mod packages;
pub mod sockets;
pub mod startup;

use std::process::Command;

use tracing::warn;

use crate::policy::Policy;
use crate::topics;
use crate::types::RawFact;

/// Source of current facts, keyed by topic.
///
/// The engine treats this as a black box; swapping in a canned source
/// makes orchestrator runs fully deterministic.
pub trait FactSource {
    /// Collect the current fact for `topic`.
    fn collect(&self, topic: &str, policy: &Policy) -> RawFact;
}

/// Live collector backed by the local system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFacts;

impl FactSource for SystemFacts {
    fn collect(&self, topic: &str, policy: &Policy) -> RawFact {
        match topic {
            topics::NETWORK_REACHABLE => network::probe(&policy.probe_host),
            topics::PATH_ENV => environment::path_value(),
            topics::LOGIN_ACCOUNTS => accounts::login_accounts(),
            topics::ADMIN_GROUP => accounts::admin_group_members(),
            topics::FIREWALL_ENABLED => firewall::state(),
            topics::FIREWALL_RULES => firewall::rules(),
            topics::LISTENING_SOCKETS => sockets::listening(),
            topics::MAC_ENFORCEMENT => mac::apparmor_enforcement(),
            topics::DISK_SMART_HEALTH => disk::smart_health(&policy.smart_device),
            topics::DISK_USAGE => disk::usage_percent("/"),
            topics::PACKAGE_REPOSITORIES => packages::repositories(),
            topics::PACKAGE_REFRESH => packages::refresh_age_days(),
            topics::EXPECTED_PROGRAMS => {
                packages::missing_programs(&policy.expected_programs)
            }
            topics::DISCOURAGED_PROGRAMS => packages::installed_list(),
            topics::STARTUP_SERVICES => startup::enabled_units(),
            topics::CRON_ENTRIES => startup::cron_entries(),
            topics::BROWSER_POLICY => browser::policy_prefs(),
            other => {
                warn!(topic = other, "no collector bound to topic");
                RawFact::Missing
            }
        }
    }
}

/// Run a status tool, returning stdout on success.
///
/// A tool that is absent or exits nonzero yields `None`; callers that
/// care about nonzero-but-useful output (smartctl, crontab) run the
/// command themselves.
pub(crate) fn run_tool(cmd: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(cmd).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
