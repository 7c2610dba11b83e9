//! Raw facts as returned by collectors.

/// A current value for one audit topic, as captured by a collector.
///
/// Collectors never fail: a missing status tool or an unreadable source
/// becomes [`RawFact::Missing`], and the classifier decides what severity
/// that absence deserves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFact {
    /// Multi-line text blob, used for snapshot comparison.
    Text(String),
    /// Scalar count (a number of units, a percentage, ...).
    Count(u64),
    /// Integer ratio, e.g. profiles in enforce mode out of all loaded.
    Ratio {
        /// Numerator.
        part: u64,
        /// Denominator. May legitimately be zero.
        total: u64,
    },
    /// Boolean probe result.
    Flag(bool),
    /// Short status token, e.g. `active`.
    Status(String),
    /// Age of some timestamp, in whole days.
    AgeDays(i64),
    /// The underlying source is absent or unreadable.
    Missing,
}

impl RawFact {
    /// View text-like facts as a string slice.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) | Self::Status(t) => Some(t),
            _ => None,
        }
    }

    /// True if the collector could not produce a value at all.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}
