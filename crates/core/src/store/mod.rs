//! Abstract asynchronous key-value store.
//!
//! The cache layers on top of whatever persistent store the host
//! environment provides. Keys are opaque strings; values are JSON. The
//! store is shared with unrelated data, which is why the cache reserves
//! a key prefix for its own entries.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the underlying store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store backend failure (I/O, database, transport).
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Stored value could not be encoded or decoded.
    #[error("Store serialization error: {0}")]
    Serialization(String),
}

/// Trait for key-value store backends.
///
/// Single-key reads and writes are assumed atomic; nothing beyond that.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Delete the entry under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently present. Used only for prefix-scoped clearing.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
