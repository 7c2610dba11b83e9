//! Core data types -- facts, topics, outcomes, and run summaries.

pub mod fact;
pub mod outcome;
pub mod summary;
pub mod topic;

pub use fact::RawFact;
pub use outcome::{CheckOutcome, Severity};
pub use summary::{RunState, RunSummary};
pub use topic::{CheckKind, Topic, TopicPolicy};
