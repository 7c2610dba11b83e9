//! Listening socket inventory.

use super::run_tool;
use crate::types::RawFact;

/// Listening TCP sockets, one per line.
///
/// `ss` without headers where available, `netstat` otherwise. Queue
/// depth columns are volatile; the normalizer masks them out.
pub fn listening() -> RawFact {
    if let Some(out) = run_tool("ss", &["-tlnH"]) {
        return RawFact::Text(out);
    }
    if let Some(out) = run_tool("netstat", &["-tln"]) {
        return RawFact::Text(out);
    }
    RawFact::Missing
}
