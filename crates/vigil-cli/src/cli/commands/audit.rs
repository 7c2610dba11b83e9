//! Audit command implementation -- run the checks, print the summary,
//! offer the update handoff.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use vigil_audit::{RunState, RunSummary, SilentGate};

use crate::cli::args::AuditArgs;
use crate::gate::TerminalGate;
use crate::output::OutputFormat;

use super::{update, Context};

/// Exit code for a run with at least one error.
const EXIT_ERRORS: i32 = 1;
/// Exit code for a run aborted by a failed prerequisite.
const EXIT_ABORTED: i32 = 2;

/// Execute the audit command.
pub fn execute(mut ctx: Context, args: &AuditArgs) -> Result<i32> {
    // CLI flags only ever tighten the configured policy
    ctx.policy.stop_on_warning |= args.stop_on_warning;
    ctx.policy.stop_on_error |= args.stop_on_error;
    ctx.policy.skip_expensive |= args.skip_expensive;

    if ctx.output_format == OutputFormat::Json {
        let mut gate = SilentGate;
        let summary = vigil_audit::audit_system(&ctx.policy, &mut gate)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(exit_code(&summary));
    }

    println!();
    println!(
        "{}",
        "  vigil audit -- baseline integrity check".bright_cyan().bold()
    );
    println!(
        "  {}",
        format!("baseline dir: {}", ctx.policy.baseline_dir.display()).dimmed()
    );
    println!();

    let mut gate = TerminalGate::new(args.non_interactive);
    let summary = vigil_audit::audit_system(&ctx.policy, &mut gate)?;

    println!();
    print_banner(&summary);
    println!();

    let code = exit_code(&summary);

    // Hand off to the package update flow; the audit itself never
    // updates anything.
    if !args.non_interactive && !summary.is_aborted() {
        let wants_update = Confirm::new()
            .with_prompt("  Run the package update workflow now?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if wants_update {
            update::run_update()?;
        }
    }

    Ok(code)
}

/// Single-line end-of-run banner.
fn print_banner(summary: &RunSummary) {
    match &summary.state {
        RunState::Aborted(reason) => {
            println!("  {} run aborted: {reason}", "[FAIL]".bright_red().bold());
        }
        RunState::Completed if summary.errors > 0 => {
            println!(
                "  {} {} error(s), {} warning(s) across {} checks",
                "[FAIL]".bright_red().bold(),
                summary.errors,
                summary.warnings,
                summary.outcomes.len()
            );
        }
        RunState::Completed if summary.warnings > 0 => {
            println!(
                "  {} {} warning(s) across {} checks",
                "[WARN]".bright_yellow().bold(),
                summary.warnings,
                summary.outcomes.len()
            );
        }
        RunState::Completed => {
            println!(
                "  {} all {} checks passed",
                "[ ok ]".bright_green().bold(),
                summary.outcomes.len()
            );
        }
    }
}

/// Map the summary to the process exit code.
fn exit_code(summary: &RunSummary) -> i32 {
    match summary.state {
        RunState::Aborted(_) => EXIT_ABORTED,
        RunState::Completed => {
            if summary.errors > 0 {
                EXIT_ERRORS
            } else {
                0
            }
        }
    }
}
