//! Comparison of collected facts -- snapshot diffs and scalar predicates.

pub mod diff;
pub mod predicate;

pub use diff::{compare, TextDiff};
pub use predicate::{evaluate, Evaluation, ThresholdSpec, Verdict};
