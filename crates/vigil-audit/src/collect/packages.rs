//! Package manager facts -- repositories, refresh age, installed sets.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::run_tool;
use crate::types::RawFact;

/// Filesystem markers whose mtime tracks the last package-metadata
/// refresh, across distributions.
const REFRESH_STAMPS: &[&str] = &[
    // apt (updated by the periodic update job)
    "/var/lib/apt/periodic/update-success-stamp",
    "/var/cache/apt/pkgcache.bin",
    // pacman sync databases
    "/var/lib/pacman/sync",
    // dnf metadata cache
    "/var/cache/dnf",
];

/// Concatenated repository configuration of the native package manager.
///
/// The blob is compared against the saved baseline after normalization,
/// so the exact formatting per manager does not matter -- only that it
/// is stable for an unchanged configuration.
pub fn repositories() -> RawFact {
    // apt: sources.list plus drop-in directory
    let mut apt = Vec::new();
    if let Ok(text) = fs::read_to_string("/etc/apt/sources.list") {
        apt.push(text);
    }
    apt.extend(read_dir_sorted("/etc/apt/sources.list.d", &["list", "sources"]));
    if !apt.is_empty() {
        return RawFact::Text(apt.join("\n"));
    }

    // dnf/yum: .repo drop-ins
    let repo_files = read_dir_sorted("/etc/yum.repos.d", &["repo"]);
    if !repo_files.is_empty() {
        return RawFact::Text(repo_files.join("\n"));
    }

    // pacman: server and include lines of pacman.conf
    if let Ok(text) = fs::read_to_string("/etc/pacman.conf") {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| {
                let t = line.trim();
                t.starts_with('[') || t.starts_with("Server") || t.starts_with("Include")
            })
            .collect();
        return RawFact::Text(lines.join("\n"));
    }

    // zypper: repo listing with URIs
    if let Some(out) = run_tool("zypper", &["lr", "-u"]) {
        return RawFact::Text(out);
    }

    RawFact::Missing
}

/// Age in days of the newest metadata refresh marker.
pub fn refresh_age_days() -> RawFact {
    let newest = REFRESH_STAMPS
        .iter()
        .filter_map(|stamp| fs::metadata(stamp).and_then(|m| m.modified()).ok())
        .max();

    match newest {
        Some(mtime) => RawFact::AgeDays(days_since(mtime)),
        None => RawFact::Missing,
    }
}

/// Expected programs that do not resolve on `PATH`, one name per line.
///
/// Empty text means everything expected is present.
pub fn missing_programs(expected: &[String]) -> RawFact {
    let missing: Vec<&str> = expected
        .iter()
        .map(String::as_str)
        .filter(|&name| !program_on_path(name))
        .collect();
    RawFact::Text(missing.join("\n"))
}

/// Full installed-package name list of the native package manager.
pub fn installed_list() -> RawFact {
    if let Some(out) = run_tool("dpkg-query", &["-f", "${binary:Package}\n", "-W"]) {
        return RawFact::Text(out);
    }
    if let Some(out) = run_tool("pacman", &["-Qq"]) {
        return RawFact::Text(out);
    }
    if let Some(out) = run_tool("rpm", &["-qa", "--qf", "%{NAME}\n"]) {
        return RawFact::Text(out);
    }
    RawFact::Missing
}

/// Check whether a program resolves on `PATH`.
///
/// `which` first; if `which` itself is missing, fall back to scanning
/// the `PATH` entries directly.
fn program_on_path(name: &str) -> bool {
    match Command::new("which").arg(name).output() {
        Ok(output) => output.status.success(),
        Err(e) => {
            debug!(error = %e, "which unavailable, scanning PATH");
            let Ok(path) = std::env::var("PATH") else {
                return false;
            };
            path.split(':')
                .any(|dir| Path::new(dir).join(name).is_file())
        }
    }
}

/// Whole days between a filesystem timestamp and now.
fn days_since(mtime: SystemTime) -> i64 {
    let then: DateTime<Utc> = mtime.into();
    (Utc::now() - then).num_days()
}

/// Contents of all files in `dir` with one of `extensions`, sorted by
/// file name for a stable capture.
fn read_dir_sorted(dir: &str, extensions: &[&str]) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<_> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .collect()
}
