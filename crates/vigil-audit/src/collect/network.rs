//! Network reachability probe.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::types::RawFact;

const TCP_PROBE_PORT: u16 = 53;
const TCP_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Probe whether the configured host is reachable.
///
/// Tries a single ICMP ping first; when ping is unavailable (not
/// installed, or not permitted), falls back to a TCP connect against
/// the DNS port. Unreachable is a finding, not an absence, so the
/// result is always a flag.
pub fn probe(host: &str) -> RawFact {
    match std::process::Command::new("ping")
        .args(["-c", "1", "-W", "2", host])
        .output()
    {
        Ok(output) => RawFact::Flag(output.status.success()),
        Err(e) => {
            debug!(error = %e, "ping unavailable, falling back to tcp probe");
            RawFact::Flag(tcp_probe(host))
        }
    }
}

fn tcp_probe(host: &str) -> bool {
    let Ok(addrs) = (host, TCP_PROBE_PORT).to_socket_addrs() else {
        // Name resolution itself needs the network for anything that is
        // not a literal address.
        return false;
    };
    for addr in addrs {
        if TcpStream::connect_timeout(&addr, TCP_PROBE_TIMEOUT).is_ok() {
            return true;
        }
    }
    false
}
