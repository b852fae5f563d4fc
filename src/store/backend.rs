//! Storage backend trait and implementations.
//!
//! The durable layout is a flat key-value space: one JSON-serialized array
//! per entity type, under a fixed key per collection. Backends only move
//! strings; (de)serialization stays in the store.
//!
//! - `FileBackend` - one `<key>.json` file per collection under a data
//!   directory (default)
//! - `MemoryBackend` - in-process map, for tests

use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for storage backends that persist raw collection records.
pub trait StorageBackend: Send + Sync {
    /// Read the JSON record stored under `key`. `None` when the record has
    /// never been written.
    fn read_record(&self, key: &str) -> Result<Option<String>>;

    /// Replace the JSON record stored under `key`.
    fn write_record(&mut self, key: &str, json: &str) -> Result<()>;

    /// Get the storage location description (for display purposes).
    fn location(&self) -> String;
}

/// File-backed storage: one JSON file per collection key.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`. No IO happens until the first
    /// read or write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Check whether the data directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Path of the file backing `key`.
    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Root directory of this backend.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for FileBackend {
    fn read_record(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write_record(&mut self, key: &str, json: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.record_path(key), json)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryBackend {
    records: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read_record(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn write_record(&mut self, key: &str, json: &str) -> Result<()> {
        self.records.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
