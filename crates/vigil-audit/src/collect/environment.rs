//! Environment expectations -- currently just the operator PATH.

use crate::types::RawFact;

/// Current value of `PATH`.
pub fn path_value() -> RawFact {
    std::env::var("PATH").map_or(RawFact::Missing, RawFact::Status)
}
