//! Baseline snapshot management -- list and promote.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use vigil_audit::BaselineStore;

use crate::cli::args::{BaselineArgs, BaselineCommands};
use crate::output::OutputFormat;

use super::Context;

/// Execute the baseline command.
pub fn execute(ctx: &Context, args: BaselineArgs) -> Result<i32> {
    let store = BaselineStore::new(ctx.policy.baseline_dir.clone());

    match args.command {
        BaselineCommands::List => list(ctx, &store),
        BaselineCommands::Promote { topic, yes } => promote(ctx, &store, topic, yes),
    }
}

/// List saved/current state per topic.
fn list(ctx: &Context, store: &BaselineStore) -> Result<i32> {
    let entries = store.entries()?;

    if ctx.output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(0);
    }

    if entries.is_empty() {
        println!(
            "  no snapshots under {} -- run `vigil audit` to capture, then promote",
            store.dir().display()
        );
        return Ok(0);
    }

    println!(
        "  {:<28} {:>8} {:>9}",
        "TOPIC".dimmed(),
        "SAVED".dimmed(),
        "CURRENT".dimmed()
    );
    for entry in entries {
        let saved = if entry.has_saved {
            "yes".bright_green()
        } else {
            "-".dimmed()
        };
        let current = if entry.has_current {
            "yes".bright_green()
        } else {
            "-".dimmed()
        };
        println!("  {:<28} {saved:>8} {current:>9}", entry.key.bright_white());
    }

    Ok(0)
}

/// Promote captures to saved snapshots, with confirmation.
fn promote(
    ctx: &Context,
    store: &BaselineStore,
    topic: Option<String>,
    yes: bool,
) -> Result<i32> {
    if !store.is_available() {
        anyhow::bail!(
            "no baseline directory at {} -- run `vigil audit` first to capture",
            store.dir().display()
        );
    }

    let targets: Vec<String> = match topic {
        Some(key) => vec![key],
        None => store
            .entries()?
            .into_iter()
            .filter(|e| e.has_current)
            .map(|e| e.key)
            .collect(),
    };

    if targets.is_empty() {
        println!("  nothing to promote -- no current captures found");
        return Ok(0);
    }

    if !yes && ctx.output_format == OutputFormat::Pretty {
        let prompt = format!(
            "  Overwrite the saved snapshot{} for: {}?",
            if targets.len() > 1 { "s" } else { "" },
            targets.join(", ")
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("  aborted, nothing promoted");
            return Ok(0);
        }
    }

    for key in &targets {
        if store.promote(key)? {
            println!("  {} {}", "promoted".bright_green(), key.bright_white());
        } else {
            println!(
                "  {} {} (no current capture)",
                "skipped ".bright_yellow(),
                key.bright_white()
            );
        }
    }

    Ok(0)
}
