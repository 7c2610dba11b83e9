//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Run the CLI application, returning the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Policy from config file (or defaults), with CLI overrides
    let mut policy = crate::config::load_policy()?;
    if let Some(dir) = cli.baseline_dir.clone() {
        policy.baseline_dir = dir;
    }

    let ctx = commands::Context {
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
        policy,
    };

    match cli.command {
        Commands::Audit(cmd_args) => commands::audit::execute(ctx, &cmd_args),
        Commands::Baseline(cmd_args) => commands::baseline::execute(&ctx, cmd_args),
        Commands::Config(cmd_args) => commands::config::execute(&ctx, cmd_args),
    }
}

/// Structured logging to stderr; `RUST_LOG` wins, `--verbose` lifts the
/// default to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
