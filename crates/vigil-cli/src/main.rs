//! vigil - desktop system integrity auditor

use anyhow::Result;

fn main() -> Result<()> {
    let code = vigil_cli::run()?;
    std::process::exit(code)
}
