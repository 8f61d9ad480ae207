//! Saved search persistence.
//!
//! Named JQL queries live in a JSON file under the platform data
//! directory. The store is loaded once at startup, mutated through
//! explicit calls, and written back on every mutation; nothing is held
//! in process-global state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named JQL query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub name: String,
    pub jql: String,
}

/// File-backed collection of saved searches.
#[derive(Debug)]
pub struct SearchStore {
    path: PathBuf,
    entries: Vec<SavedSearch>,
}

impl SearchStore {
    /// The default store location under the platform data directory.
    pub fn default_path() -> io::Result<PathBuf> {
        let base = dirs::data_local_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no local data directory available")
        })?;
        Ok(base.join("atlasctl").join("searches.json"))
    }

    /// Open the store at `path`, starting empty if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = entries.len(), "search store opened");
        Ok(Self { path, entries })
    }

    /// Add a search. Names must be unique.
    pub fn add(&mut self, name: &str, jql: &str) -> io::Result<()> {
        if self.get(name).is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("a search named '{}' already exists", name),
            ));
        }
        self.entries.push(SavedSearch {
            name: name.to_string(),
            jql: jql.to_string(),
        });
        self.persist()
    }

    /// Remove a search by name. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> io::Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&SavedSearch> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedSearch> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SearchStore {
        SearchStore::open(dir.path().join("searches.json")).unwrap()
    }

    #[test]
    fn opens_empty_when_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn add_and_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("mine", "assignee = currentUser()").unwrap();

        let saved = store.get("mine").unwrap();
        assert_eq!(saved.jql, "assignee = currentUser()");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn entries_survive_a_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("searches.json");

        let mut store = SearchStore::open(&path).unwrap();
        store.add("hot", "priority = \"Highest\"").unwrap();
        drop(store);

        let reopened = SearchStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("hot").unwrap().jql, "priority = \"Highest\"");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("mine", "assignee = currentUser()").unwrap();

        let err = store.add("mine", "project = \"OTHER\"").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_whether_anything_went_away() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("mine", "assignee = currentUser()").unwrap();

        assert!(store.remove("mine").unwrap());
        assert!(!store.remove("mine").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_panic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("searches.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SearchStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
