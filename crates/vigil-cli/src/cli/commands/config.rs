//! Config command implementation.

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config;
use crate::output::OutputFormat;

use super::Context;

/// Execute the config command.
pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<i32> {
    match args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Init => init(),
    }
}

/// Print the effective policy.
fn show(ctx: &Context) -> Result<i32> {
    if ctx.output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&ctx.policy)?);
        return Ok(0);
    }

    println!(
        "  {}",
        format!("config file: {}", config::config_path()?.display()).dimmed()
    );
    println!();
    println!("{}", config::render_policy(&ctx.policy)?);
    Ok(0)
}

/// Scaffold a default config file.
fn init() -> Result<i32> {
    let path = config::init_config()?;
    println!(
        "  {} {}",
        "wrote".bright_green(),
        path.display().to_string().bright_white()
    );
    println!("  edit it, then run `vigil audit`");
    Ok(0)
}
