//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Desktop system integrity auditor
///
/// Compares live system state -- accounts, firewall, disks, MAC
/// enforcement, packages, startup mechanisms, browser policy -- against
/// saved baselines and fixed expectations, and reports every deviation
/// with a severity.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Baseline snapshot directory (overrides the config file)
    #[arg(long, global = true, env = "VIGIL_BASELINE_DIR")]
    pub baseline_dir: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full audit
    Audit(AuditArgs),

    /// Inspect and promote baseline snapshots
    Baseline(BaselineArgs),

    /// Manage the policy configuration file
    Config(ConfigArgs),
}

// ============================================================================
// Audit command
// ============================================================================

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Pause for acknowledgment after every warning
    #[arg(long)]
    pub stop_on_warning: bool,

    /// Pause for acknowledgment after every error
    #[arg(long)]
    pub stop_on_error: bool,

    /// Skip slow checks (SMART health probes)
    #[arg(long)]
    pub skip_expensive: bool,

    /// Never prompt: no acknowledgment pauses, no update handoff
    #[arg(short = 'n', long)]
    pub non_interactive: bool,
}

// ============================================================================
// Baseline command
// ============================================================================

#[derive(Args, Debug)]
pub struct BaselineArgs {
    #[command(subcommand)]
    pub command: BaselineCommands,
}

#[derive(Subcommand, Debug)]
pub enum BaselineCommands {
    /// List saved snapshots and current captures
    List,

    /// Promote current captures to saved snapshots
    Promote {
        /// Topic key to promote; all captured topics when omitted
        topic: Option<String>,

        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective policy
    Show,

    /// Write a default config file to edit
    Init,
}
