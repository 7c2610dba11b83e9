//! Browser configuration capture (Firefox system policy).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::RawFact;

/// Known Firefox policy and autoconfig locations across distributions.
const POLICY_PATHS: &[&str] = &[
    "/etc/firefox/policies/policies.json",
    "/usr/lib/firefox/distribution/policies.json",
    "/usr/lib64/firefox/distribution/policies.json",
    "/etc/firefox/syspref.js",
    "/usr/lib/firefox/defaults/pref",
    "/usr/lib64/firefox/defaults/pref",
];

/// System-level browser policy: policies.json content plus every
/// `pref(...)` line from the autoconfig directories.
///
/// Directory scans are sorted so an unchanged installation captures
/// identically run to run.
pub fn policy_prefs() -> RawFact {
    let mut sections = Vec::new();

    for location in POLICY_PATHS {
        let path = Path::new(location);
        if path.is_file() {
            match fs::read_to_string(path) {
                Ok(text) => sections.push(extract_prefs(location, &text)),
                Err(e) => debug!(path = location, error = %e, "unreadable policy file"),
            }
        } else if path.is_dir() {
            let Ok(entries) = fs::read_dir(path) else {
                continue;
            };
            let mut files: Vec<_> = entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("js"))
                .collect();
            files.sort();
            for file in files {
                if let Ok(text) = fs::read_to_string(&file) {
                    sections.push(extract_prefs(&file.display().to_string(), &text));
                }
            }
        }
    }

    let sections: Vec<String> = sections.into_iter().filter(|s| !s.is_empty()).collect();
    if sections.is_empty() {
        RawFact::Missing
    } else {
        RawFact::Text(sections.join("\n"))
    }
}

/// Keep only the lines that carry policy: pref calls for .js sources,
/// everything non-blank for policies.json.
fn extract_prefs(source: &str, text: &str) -> String {
    if source.ends_with(".json") {
        return text.trim().to_string();
    }
    text.lines()
        .filter(|line| line.trim_start().contains("pref("))
        .collect::<Vec<_>>()
        .join("\n")
}
