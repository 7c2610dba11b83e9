//! # vigil-cli
//!
//! Operator front end for the [`vigil_audit`] engine: argument parsing,
//! colored per-check reporting, the interactive acknowledgment gate,
//! baseline snapshot management, and the post-audit update handoff.

pub mod cli;
pub mod config;
pub mod gate;
pub mod output;

pub use cli::run;
