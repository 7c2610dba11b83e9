//! File-backed baseline snapshot store.
//!
//! One pair of files per topic key under an operator-designated
//! directory: `<key>.saved` holds the promoted "known good" snapshot,
//! `<key>.current` holds the normalized capture written during the most
//! recent run. The engine only ever writes `.current`; promotion to
//! `.saved` is an explicit operator action.
//!
//! Absence of the directory is a valid state -- it disables every
//! snapshot-requiring topic with a warning, never a crash.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuditError, Result};

const SAVED_EXT: &str = "saved";
const CURRENT_EXT: &str = "current";

/// Saved/current state of one topic in the store, as listed for the
/// operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEntry {
    /// Topic key (file stem).
    pub key: String,
    /// A promoted snapshot exists.
    pub has_saved: bool,
    /// A capture from a previous run exists.
    pub has_current: bool,
}

/// Store rooted at one directory.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    dir: PathBuf,
}

impl BaselineStore {
    /// Store rooted at `dir`. The directory is not created; its absence
    /// is reported through [`BaselineStore::is_available`].
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True when the baseline directory exists.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    /// Read the saved snapshot for a topic, if one was promoted.
    pub fn read_snapshot(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key, SAVED_EXT))
    }

    /// Read the current capture left by the most recent run.
    pub fn read_current(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key, CURRENT_EXT))
    }

    /// Write the normalized current capture for this run.
    ///
    /// Overwrites any capture from a previous run; the saved snapshot
    /// is untouched.
    pub fn write_current_capture(&self, key: &str, text: &str) -> Result<()> {
        let path = self.path_for(key, CURRENT_EXT);
        debug!(key, path = %path.display(), "writing current capture");
        fs::write(&path, text).map_err(|e| AuditError::io(path.display().to_string(), e))
    }

    /// Promote the current capture to the saved snapshot.
    ///
    /// Returns `false` when there is no current capture to promote.
    pub fn promote(&self, key: &str) -> Result<bool> {
        let current = self.path_for(key, CURRENT_EXT);
        let saved = self.path_for(key, SAVED_EXT);
        if !current.is_file() {
            return Ok(false);
        }
        fs::copy(&current, &saved)
            .map_err(|e| AuditError::io(saved.display().to_string(), e))?;
        Ok(true)
    }

    /// List every topic key present in the store, with its state.
    pub fn entries(&self) -> Result<Vec<BaselineEntry>> {
        let mut keys = std::collections::BTreeMap::<String, (bool, bool)>::new();
        let dir_entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AuditError::io(self.dir.display().to_string(), e)),
        };

        for entry in dir_entries {
            let entry =
                entry.map_err(|e| AuditError::io(self.dir.display().to_string(), e))?;
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let slot = keys.entry(stem.to_string()).or_insert((false, false));
            match ext {
                SAVED_EXT => slot.0 = true,
                CURRENT_EXT => slot.1 = true,
                _ => {}
            }
        }

        Ok(keys
            .into_iter()
            .map(|(key, (has_saved, has_current))| BaselineEntry {
                key,
                has_saved,
                has_current,
            })
            .collect())
    }

    fn path_for(&self, key: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ext}"))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AuditError::io(path.display().to_string(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_directory_reads_as_empty() {
        let store = BaselineStore::new("/nonexistent/vigil-baseline");
        assert!(!store.is_available());
        assert_eq!(store.read_snapshot("firewall-rules").unwrap(), None);
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn write_then_promote_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());

        assert_eq!(store.read_snapshot("repos").unwrap(), None);

        store.write_current_capture("repos", "deb stable main").unwrap();
        assert_eq!(store.read_snapshot("repos").unwrap(), None);
        assert_eq!(
            store.read_current("repos").unwrap().as_deref(),
            Some("deb stable main")
        );

        assert!(store.promote("repos").unwrap());
        assert_eq!(
            store.read_snapshot("repos").unwrap().as_deref(),
            Some("deb stable main")
        );
    }

    #[test]
    fn promote_without_capture_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        assert!(!store.promote("repos").unwrap());
        assert_eq!(store.read_snapshot("repos").unwrap(), None);
    }

    #[test]
    fn entries_reflect_file_state() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());

        store.write_current_capture("a", "1").unwrap();
        store.write_current_capture("b", "2").unwrap();
        store.promote("b").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], BaselineEntry {
            key: "a".into(),
            has_saved: false,
            has_current: true,
        });
        assert_eq!(entries[1], BaselineEntry {
            key: "b".into(),
            has_saved: true,
            has_current: true,
        });
    }

    #[test]
    fn capture_overwrites_previous_run() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        store.write_current_capture("rules", "old").unwrap();
        store.write_current_capture("rules", "new").unwrap();
        assert_eq!(store.read_current("rules").unwrap().as_deref(), Some("new"));
    }
}
