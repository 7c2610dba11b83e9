//! Post-audit package update handoff.
//!
//! The audit never updates anything itself; when the operator opts in
//! after a run, this hands the terminal to the native package manager.

use std::process::Command;

use anyhow::Result;
use colored::Colorize;

/// Update command lines per package manager, tried in order. Each
/// entry is the probe binary plus the interactive update invocation.
const UPDATE_FLOWS: &[(&str, &[&[&str]])] = &[
    ("pkcon", &[&["pkcon", "update"]]),
    ("apt", &[&["sudo", "apt", "update"], &["sudo", "apt", "upgrade"]]),
    ("dnf", &[&["sudo", "dnf", "upgrade"]]),
    ("pacman", &[&["sudo", "pacman", "-Syu"]]),
    ("zypper", &[&["sudo", "zypper", "update"]]),
];

/// Run the first available update flow, inheriting the terminal.
pub fn run_update() -> Result<()> {
    for &(probe, invocations) in UPDATE_FLOWS {
        if !binary_exists(probe) {
            continue;
        }

        println!();
        for invocation in invocations {
            println!("  {} {}", "running".dimmed(), invocation.join(" ").bright_white());
            let status = Command::new(invocation[0])
                .args(&invocation[1..])
                .status()?;
            if !status.success() {
                anyhow::bail!("`{}` exited with {status}", invocation.join(" "));
            }
        }
        return Ok(());
    }

    anyhow::bail!("no supported package manager found (pkcon/apt/dnf/pacman/zypper)")
}

fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .is_ok_and(|o| o.status.success())
}
