//! Engine error types.

use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors the audit engine can surface to its caller.
///
/// Note that per-check trouble (a missing tool, an absent baseline file)
/// is *not* an error -- it degrades into the check's own outcome. Only
/// conditions that make the engine itself unusable end up here.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Filesystem access failed.
    #[error("i/o error at {path}: {source}")]
    Io {
        /// Path being accessed when the error occurred.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A pattern in the topic table or policy failed to compile.
    #[error("invalid pattern for {topic}: {reason}")]
    Pattern {
        /// Topic the pattern belongs to.
        topic: String,
        /// Compiler message.
        reason: String,
    },

    /// The policy contains a value the engine cannot work with.
    #[error("invalid policy: {0}")]
    Policy(String),
}

impl AuditError {
    /// Construct an `Io` error with path context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Construct a `Pattern` error for a topic.
    pub fn pattern(topic: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Pattern {
            topic: topic.into(),
            reason: reason.to_string(),
        }
    }
}
