//! # JSON File Store
//!
//! Whole-file JSON persistence. The file is read once at open and kept in
//! memory; every mutation rewrites the complete document (temp file + rename).

use super::lock::FileLock;
use super::KeyValueStore;
use crate::errors::StoreError;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// `KeyValueStore` backed by a single pretty-printed JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Map<String, Value>>,
    /// Serializes file rewrites so a stale snapshot never lands last.
    write_lock: Mutex<()>,
    _lock: FileLock,
}

impl JsonFileStore {
    /// Open (or start) the store at `path`.
    ///
    /// A missing or unparsable file starts an empty store. Fails only if the
    /// file exists but cannot be read, or another process holds the lock.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let lock = FileLock::acquire(&path).map_err(|e| StoreError::Locked(e.to_string()))?;

        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
                Ok(map) => {
                    info!(path = %path.display(), keys = map.len(), "Loaded store from disk");
                    map
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Store file unparsable, starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No store file, starting empty");
                Map::new()
            }
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
            write_lock: Mutex::new(()),
            _lock: lock,
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to a copy of the document, write it out, and only then
    /// swap it in. A failed write leaves the in-memory document untouched.
    async fn commit<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.write_lock.lock().await;

        let mut next = self.data.read().clone();
        mutate(&mut next);
        let bytes = serde_json::to_vec_pretty(&next).map_err(|e| StoreError::Serialization {
            key: "*".to_string(),
            reason: e.to_string(),
        })?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.path.display(), e)))?;

        *self.data.write() = next;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Store persisted");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.commit(|data| {
            data.insert(key.to_string(), value);
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.commit(|data| {
            data.remove(key);
        })
        .await
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StoreError> {
        Ok(self.data.read().clone())
    }
}
