use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::KeyValueStore;

/// Key-value store kept as a single JSON object on disk. Values are opaque
/// strings, the same shape browser local storage has.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = load_entries(&path)?;
        log::debug!("Opened key-value store at {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Starts from nothing; the first `set` replaces whatever is on disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        save_entries(&self.path, &self.entries)
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read key-value store from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to deserialize key-value store from {}", path.display()))
}

fn save_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(entries)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write key-value store to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("timezones").unwrap(), None);
        store.set("timezones", "[]").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("timezones").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_a_panic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        assert!(JsonFileStore::open(&path).is_err());

        let mut store = JsonFileStore::empty(&path);
        store.set("k", "v").unwrap();
        assert_eq!(JsonFileStore::open(&path).unwrap().get("k").unwrap().as_deref(), Some("v"));
    }
}
