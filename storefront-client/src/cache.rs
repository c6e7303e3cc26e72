// storefront-client/src/cache.rs
// Durable cart membership cache

use parking_lot::Mutex;
use shared::CartMembershipSet;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::ClientConfig;

/// Cart store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string key/value store scoped to one storefront origin
pub trait CartStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`; characters outside `[A-Za-z0-9_-]` become `_`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl CartStore for FileCartStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Process-local store, for sessions without a state directory
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Last-known cart membership, persisted across sessions
///
/// Never fails: unreadable or malformed entries read as an empty set, and
/// write failures are logged and dropped.
#[derive(Clone)]
pub struct LocalCartCache {
    store: Arc<dyn CartStore>,
    key: String,
}

impl std::fmt::Debug for LocalCartCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCartCache").field("key", &self.key).finish()
    }
}

impl LocalCartCache {
    pub fn new(store: Arc<dyn CartStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// File-backed under `state_dir` when configured, in memory otherwise
    pub fn from_config(config: &ClientConfig) -> Self {
        let store: Arc<dyn CartStore> = match &config.state_dir {
            Some(dir) => Arc::new(FileCartStore::new(dir)),
            None => Arc::new(MemoryCartStore::new()),
        };
        Self::new(store, config.cart_cache_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> CartMembershipSet {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartMembershipSet::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read cart cache");
                return CartMembershipSet::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding malformed cart cache");
                CartMembershipSet::new()
            }
        }
    }

    pub fn save(&self, set: &CartMembershipSet) {
        let result = serde_json::to_string(set)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "Failed to write cart cache");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to clear cart cache");
        }
    }
}
