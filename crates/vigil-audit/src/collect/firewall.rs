//! Firewall posture -- state token and rule listing.

use super::run_tool;
use crate::types::RawFact;

/// Firewall state as a short token: `active` or `inactive`.
///
/// Tries ufw, then firewalld. Both need privileges for full detail but
/// report their state to unprivileged callers on most setups.
pub fn state() -> RawFact {
    if let Some(out) = run_tool("ufw", &["status"]) {
        for line in out.lines() {
            if let Some(value) = line.strip_prefix("Status:") {
                return RawFact::Status(value.trim().to_string());
            }
        }
    }

    if let Some(out) = run_tool("firewall-cmd", &["--state"]) {
        let token = if out.trim() == "running" { "active" } else { "inactive" };
        return RawFact::Status(token.to_string());
    }

    RawFact::Missing
}

/// Full rule listing for snapshot comparison.
///
/// Preference order: ufw verbose status, iptables rule dump, nftables
/// ruleset. The normalizer strips the volatile parts (state banner,
/// packet counters).
pub fn rules() -> RawFact {
    if let Some(out) = run_tool("ufw", &["status", "verbose"]) {
        return RawFact::Text(out);
    }
    if let Some(out) = run_tool("iptables", &["-S"]) {
        return RawFact::Text(out);
    }
    if let Some(out) = run_tool("nft", &["list", "ruleset"]) {
        return RawFact::Text(out);
    }
    RawFact::Missing
}
