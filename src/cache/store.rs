//! Disk-backed request cache
//!
//! Provides a `CacheStore` that keeps every previously fetched response in a
//! single JSON file, loaded whole at startup and rewritten whole after every
//! insert. Entries never expire; the file persists until manually deleted.

use directories::ProjectDirs;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the on-disk cache
const CACHE_FILE_NAME: &str = "nps_cache.json";

/// Reasons the cache file could not be loaded
///
/// Never surfaced to callers: `CacheStore::open` collapses every variant to
/// an empty cache. The enum exists so the recovery is an explicit policy
/// rather than a swallowed exception.
#[derive(Debug, Error)]
enum LoadError {
    /// The file could not be read
    #[error("failed to read cache file: {0}")]
    Io(#[from] io::Error),

    /// The file contents were not a JSON object
    #[error("failed to parse cache file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A persistent mapping from request key to cached response
///
/// Values are either raw response text (stored as a JSON string) or a
/// pre-parsed JSON document. A key holds at most one value; `put` overwrites
/// and the last write wins. Every `put` synchronously rewrites the entire
/// backing file, so no teardown or flush step is needed.
#[derive(Debug)]
pub struct CacheStore {
    /// Backing file for the cache
    path: PathBuf,
    /// In-memory view of the cache contents
    entries: BTreeMap<String, Value>,
}

impl CacheStore {
    /// Opens the cache at the default location
    ///
    /// Uses an XDG-compliant cache directory (`~/.cache/parkscout/` on
    /// Linux) when a home directory is available, otherwise falls back to
    /// the file name relative to the working directory.
    pub fn open_default() -> Self {
        let path = match ProjectDirs::from("", "", "parkscout") {
            Some(dirs) => dirs.cache_dir().join(CACHE_FILE_NAME),
            None => PathBuf::from(CACHE_FILE_NAME),
        };
        Self::open(path)
    }

    /// Opens the cache backed by the given file
    ///
    /// If the file is missing, unreadable, or malformed the store starts
    /// empty; a broken cache is never an error, just a cold one.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "starting with empty cache");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Looks up a cached value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or overwrites an entry, then persists the whole cache
    ///
    /// Write cost is O(total cache size), an accepted trade-off at the
    /// expected scale of a few hundred to a few thousand entries.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> io::Result<()> {
        self.entries.insert(key.into(), value);
        self.flush()
    }

    /// Rewrites the backing file from the in-memory mapping
    fn flush(&self) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

/// Reads and parses the cache file into a mapping
fn load_entries(path: &Path) -> Result<BTreeMap<String, Value>, LoadError> {
    let contents = fs::read_to_string(path)?;
    let entries = serde_json::from_str(&contents)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::open(temp_dir.path().join(CACHE_FILE_NAME));
        (store, temp_dir)
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.is_empty(), "Missing cache file should yield empty store");
    }

    #[test]
    fn test_open_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(CACHE_FILE_NAME);
        fs::write(&path, "{ not valid json").expect("Failed to write corrupt file");

        let store = CacheStore::open(&path);

        assert!(store.is_empty(), "Corrupt cache file should yield empty store");
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.get("https://example.com/missing").is_none());
    }

    #[test]
    fn test_put_then_get() {
        let (mut store, _temp_dir) = create_test_store();

        store
            .put("https://example.com/page", json!("<html></html>"))
            .expect("Put should succeed");

        assert_eq!(
            store.get("https://example.com/page"),
            Some(&json!("<html></html>"))
        );
    }

    #[test]
    fn test_put_persists_across_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(CACHE_FILE_NAME);

        let mut store = CacheStore::open(&path);
        store
            .put("k", json!({"searchResults": []}))
            .expect("Put should succeed");

        let reopened = CacheStore::open(&path);

        assert_eq!(reopened.get("k"), Some(&json!({"searchResults": []})));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let (mut store, _temp_dir) = create_test_store();

        store.put("k", json!("first")).expect("First put should succeed");
        store.put("k", json!("second")).expect("Second put should succeed");

        assert_eq!(store.get("k"), Some(&json!("second")));
        assert_eq!(store.len(), 1, "Overwrite should not add a second entry");
    }

    #[test]
    fn test_put_creates_parent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("dir").join(CACHE_FILE_NAME);

        let mut store = CacheStore::open(&path);
        store.put("k", json!("v")).expect("Put should succeed");

        assert!(path.exists(), "Cache file should exist under nested directory");
    }

    #[test]
    fn test_file_holds_entire_mapping() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(CACHE_FILE_NAME);

        let mut store = CacheStore::open(&path);
        store.put("a", json!("1")).expect("Put should succeed");
        store.put("b", json!("2")).expect("Put should succeed");

        let contents = fs::read_to_string(&path).expect("Should read cache file");
        let parsed: BTreeMap<String, Value> =
            serde_json::from_str(&contents).expect("Cache file should be a JSON object");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("a"), Some(&json!("1")));
        assert_eq!(parsed.get("b"), Some(&json!("2")));
    }
}
