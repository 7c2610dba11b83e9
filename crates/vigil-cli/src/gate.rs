//! Terminal interaction gate -- per-check reporting plus the blocking
//! acknowledgment pause.

use colored::Colorize;
use dialoguer::Confirm;

use vigil_audit::{AuditGate, CheckOutcome};

use crate::output::severity_tag;

/// Evidence lines shown before truncating.
const MAX_EVIDENCE_LINES: usize = 12;

/// Gate that prints every outcome as it is produced and, when asked,
/// blocks for operator acknowledgment.
#[derive(Debug, Clone, Copy)]
pub struct TerminalGate {
    /// Never block; print only.
    pub non_interactive: bool,
}

impl TerminalGate {
    /// Interactive gate unless `non_interactive` is set.
    #[must_use]
    pub const fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }
}

impl AuditGate for TerminalGate {
    fn on_outcome(&mut self, outcome: &CheckOutcome, pause: bool) {
        println!(
            "  {} {} {}",
            severity_tag(outcome.severity),
            outcome.label.bright_white(),
            outcome.message.normal()
        );

        for line in outcome.evidence.iter().take(MAX_EVIDENCE_LINES) {
            println!("         {}", line.dimmed());
        }
        if outcome.evidence.len() > MAX_EVIDENCE_LINES {
            println!(
                "         {}",
                format!("... and {} more", outcome.evidence.len() - MAX_EVIDENCE_LINES)
                    .dimmed()
            );
        }

        if pause && !self.non_interactive {
            // The outcome is already recorded; this wait changes nothing
            // but the pacing of the run.
            let acknowledged = Confirm::new()
                .with_prompt("    Acknowledge and continue?")
                .default(true)
                .interact();
            if acknowledged.is_err() {
                // No usable terminal: behave as non-interactive.
                tracing::debug!("no terminal for acknowledgment prompt, continuing");
            }
        }
    }
}
