//! Persistent contact store
//!
//! Maps canonical phone numbers to display names, with a side table of
//! numbers that have been seen but not yet named. The file is a two-table
//! TOML document so a human can fill in names between runs:
//!
//! ```toml
//! [known]
//! "+36201234567" = "Alice"
//!
//! [unknown]
//! "+36301112233" = "???"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;

/// Value written for numbers discovered during a run but not yet named
pub const UNKNOWN_PLACEHOLDER: &str = "???";

/// The persisted two-section contact database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDatabase {
    /// Canonical number → display name
    #[serde(default)]
    pub known: BTreeMap<String, String>,
    /// Canonical numbers seen but not yet named, placeholder-valued
    #[serde(default)]
    pub unknown: BTreeMap<String, String>,
}

/// Contact store: loaded once per run, mutated in memory, saved once at the end
#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
    database: ContactDatabase,
    dirty: bool,
}

impl ContactStore {
    /// Load the store from `path`.
    ///
    /// A missing file is the first-run case and yields an empty database,
    /// not an error.
    pub fn load(path: &Path) -> Result<Self> {
        let database = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            debug!(path = %path.display(), "contact file not found, starting with an empty database");
            ContactDatabase::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            database,
            dirty: false,
        })
    }

    /// Resolve a canonical number to a display name.
    ///
    /// On a miss the number is recorded in the unknown section with a
    /// placeholder value and `None` is returned; the caller decides what a
    /// missing contact means for the file. Null phone fields never reach
    /// this method.
    pub fn resolve(&mut self, canonical: &str) -> Option<String> {
        if let Some(name) = self.database.known.get(canonical) {
            // A number promoted to known by a human edit may still carry a
            // stale unknown entry; drop it so the sections stay disjoint.
            if self.database.unknown.remove(canonical).is_some() {
                self.dirty = true;
            }
            return Some(name.clone());
        }

        if self
            .database
            .unknown
            .insert(canonical.to_string(), UNKNOWN_PLACEHOLDER.to_string())
            .is_none()
        {
            info!(number = canonical, "recorded new unknown number");
            self.dirty = true;
        }

        None
    }

    /// Persist both sections back to the file the store was loaded from.
    pub fn save(&mut self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.database)?;
        std::fs::write(&self.path, contents)?;
        self.dirty = false;
        Ok(())
    }

    /// Whether the run discovered numbers not yet persisted
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read-only view of the database, for reporting and tests
    #[must_use]
    pub const fn database(&self) -> &ContactDatabase {
        &self.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ContactStore::load(&dir.path().join("contacts.toml")).expect("loads");
        assert!(store.database().known.is_empty());
        assert!(store.database().unknown.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn miss_records_unknown_number() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ContactStore::load(&dir.path().join("contacts.toml")).expect("loads");

        assert_eq!(store.resolve("+36201234567"), None);
        assert!(store.is_dirty());
        assert_eq!(
            store.database().unknown.get("+36201234567").map(String::as_str),
            Some(UNKNOWN_PLACEHOLDER)
        );
    }

    #[test]
    fn hit_on_known_number_returns_name_and_clears_stale_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.toml");
        std::fs::write(
            &path,
            "[known]\n\"+36201234567\" = \"Alice\"\n\n[unknown]\n\"+36201234567\" = \"???\"\n",
        )
        .expect("write fixture");

        let mut store = ContactStore::load(&path).expect("loads");
        assert_eq!(store.resolve("+36201234567"), Some("Alice".to_string()));
        assert!(!store.database().unknown.contains_key("+36201234567"));
    }

    #[test]
    fn save_round_trips_known_entries_and_appends_unknowns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.toml");
        std::fs::write(&path, "[known]\n\"+36201234567\" = \"Alice\"\n").expect("write fixture");

        let mut store = ContactStore::load(&path).expect("loads");
        assert_eq!(store.resolve("+36301112233"), None);
        store.save().expect("saves");

        let reloaded = ContactStore::load(&path).expect("reloads");
        assert_eq!(
            reloaded.database().known.get("+36201234567").map(String::as_str),
            Some("Alice")
        );
        assert_eq!(
            reloaded.database().unknown.get("+36301112233").map(String::as_str),
            Some(UNKNOWN_PLACEHOLDER)
        );
    }
}
