//! Configuration management.
//!
//! The config file is a TOML rendering of the engine [`Policy`]; every
//! field is optional and falls back to the engine default. With no file
//! at all the auditor runs with defaults, except that the baseline
//! directory is moved into the user's data dir so an unprivileged
//! operator can promote snapshots.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

use vigil_audit::Policy;

/// Project directory handle for config and data paths.
fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("sh", "vigil", "vigil")
        .context("could not determine config directory")
}

/// Path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Default per-user baseline directory.
pub fn default_baseline_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("baseline"))
}

/// Load the policy from the config file, or defaults when absent.
///
/// A policy whose baseline directory was not explicitly configured is
/// pointed at the per-user data dir.
pub fn load_policy() -> Result<Policy> {
    let path = config_path()?;

    let mut policy = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?
    } else {
        Policy::default()
    };

    if policy.baseline_dir == Policy::default().baseline_dir {
        policy.baseline_dir = default_baseline_dir()?;
    }

    Ok(policy)
}

/// Write the default policy as a starting config file.
///
/// Refuses to clobber an existing file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_path()?;
    if path.exists() {
        anyhow::bail!("config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let policy = Policy {
        baseline_dir: default_baseline_dir()?,
        ..Policy::default()
    };
    let content = toml::to_string_pretty(&policy).context("rendering default config")?;
    std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}

/// Render the effective policy as TOML for `config show`.
pub fn render_policy(policy: &Policy) -> Result<String> {
    toml::to_string_pretty(policy).context("rendering policy")
}
