//! Key-value store holding the latest combined value and status report.
//!
//! The pipeline only needs `get`/`put` on string keys. There is no locking
//! across a read-then-write pair: two overlapping rounds race, and a reader
//! sees either the old or the new value, never a mix.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result, StoreError};
use crate::status::StatusReport;

/// Key of the combined randomness hex string.
pub const COMBINED_KEY: &str = "qRandomness";
/// Key of the JSON-serialised [`StatusReport`].
pub const STATUS_KEY: &str = "generatorStatus";

/// Generic string key-value store.
pub trait RandomStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: RandomStore + ?Sized> RandomStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

impl<S: RandomStore + ?Sized> RandomStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

/// Latest combined value, or [`Error::NotInitialized`] before the first
/// successful round.
pub fn load_combined(store: &dyn RandomStore) -> Result<String> {
    store.get(COMBINED_KEY)?.ok_or(Error::NotInitialized)
}

/// Latest status report, if any round has completed.
pub fn load_status(store: &dyn RandomStore) -> Result<Option<StatusReport>> {
    match store.get(STATUS_KEY)? {
        Some(json) => Ok(Some(
            serde_json::from_str(&json).map_err(StoreError::from)?,
        )),
        None => Ok(None),
    }
}

pub fn save_combined(store: &dyn RandomStore, combined: &str) -> Result<()> {
    log::debug!("storing combined value ({} hex chars)", combined.len());
    Ok(store.put(COMBINED_KEY, combined)?)
}

pub fn save_status(store: &dyn RandomStore, report: &StatusReport) -> Result<()> {
    let json = serde_json::to_string(report).map_err(StoreError::from)?;
    log::debug!("storing status report {}", report.round_id);
    Ok(store.put(STATUS_KEY, &json)?)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Mutex-protected map. Each `put` replaces the value atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RandomStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// JSON object file. Each `put` reads the current object, updates one key,
/// and replaces the file via write-to-temp + rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(HashMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RandomStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Serialises writers within this process only.
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}
