//! Key/value store implementations
//!
//! `FileKeyValueStore` keeps each slot in `<dir>/<key>.json` and replaces it
//! atomically: the new content goes to a sibling temp file which is then
//! renamed over the slot.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::infrastructure::traits::{FileSystem, KeyValueStore};

/// File-backed store, one file per key.
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Keep keys usable as file names.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.slot_path(key);
        if !self.fs.is_file(&path) {
            debug!("get: no slot at {}", path.display());
            return Ok(None);
        }
        self.fs.read_to_string(&path).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.slot_path(key);
        self.fs.ensure_parent(&path)?;

        let temp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        self.fs.write(&temp_path, value)?;
        if let Err(e) = self.fs.rename(&temp_path, &path) {
            let _ = self.fs.remove_file(&temp_path);
            return Err(e);
        }
        debug!("set: wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Process-local store, nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    #[test]
    fn given_missing_slot_when_get_then_none() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Arc::new(RealFileSystem), temp.path());

        assert_eq!(store.get("regionData").unwrap(), None);
    }

    #[test]
    fn given_written_slot_when_get_then_returns_value_without_temp_leftovers() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Arc::new(RealFileSystem), temp.path().join("nested"));

        store.set("regionData", "[]").unwrap();
        store.set("regionData", "[1]").unwrap();

        assert_eq!(store.get("regionData").unwrap().as_deref(), Some("[1]"));
        let files: Vec<_> = std::fs::read_dir(temp.path().join("nested"))
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn given_key_with_separators_when_mapping_to_path_then_stays_in_dir() {
        let store = FileKeyValueStore::new(Arc::new(RealFileSystem), "/data");

        let path = store.slot_path("../etc/passwd");

        assert_eq!(path.parent(), Some(Path::new("/data")));
    }

    #[test]
    fn given_memory_store_when_set_then_clones_share_slots() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set("k", "v").unwrap();

        assert_eq!(clone.get("k").unwrap().as_deref(), Some("v"));
    }
}
