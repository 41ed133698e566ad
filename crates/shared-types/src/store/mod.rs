//! # Key-Value Persistence Port
//!
//! A small store interface (`get`/`set`/`delete`/`get_all`) over
//! JSON values. Each logical table lives under one key and is rewritten in
//! full on every mutation, so any backend that can atomically replace a value
//! can stand in for the JSON file.

mod json_file;
mod lock;
mod memory;

pub use json_file::JsonFileStore;
pub use lock::{FileLock, LockError};
pub use memory::MemoryStore;

use crate::errors::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Logical tables held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbKey {
    /// Array of polls.
    Polls,
    /// Map of challenge token to expiry.
    Challenges,
}

impl DbKey {
    /// Key under which the table is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            DbKey::Polls => "polls",
            DbKey::Challenges => "challenges",
        }
    }
}

/// Key-value persistence port.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a value by key.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value under `key` and persist.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key` and persist.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Snapshot of every entry.
    async fn get_all(&self) -> Result<Map<String, Value>, StoreError>;
}

/// Load and deserialize a table. A missing key yields `Ok(None)`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: DbKey,
) -> Result<Option<T>, StoreError> {
    match store.get(key.as_str()).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Serialization {
                key: key.as_str().to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Serialize and store a table.
pub async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: DbKey,
    value: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(value).map_err(|e| StoreError::Serialization {
        key: key.as_str().to_string(),
        reason: e.to_string(),
    })?;
    store.set(key.as_str(), value).await
}
