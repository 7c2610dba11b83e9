//! Output formatting for different formats.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use colored::Colorize;
use vigil_audit::Severity;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored per-check lines.
    #[default]
    Pretty,
    /// JSON summary on stdout.
    Json,
}

/// Colored console tag for a severity.
#[must_use]
pub fn severity_tag(severity: Severity) -> colored::ColoredString {
    let tag = format!("[{}]", severity.tag());
    match severity {
        Severity::Success => tag.bright_green(),
        Severity::Info => tag.bright_blue(),
        Severity::Warning => tag.bright_yellow(),
        Severity::Error => tag.bright_red(),
    }
}
