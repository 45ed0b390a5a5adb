//! Mock key-value store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::store::{KvStore, StoreError};

/// In-memory store with failure injection.
///
/// With `fail_all(true)` every operation returns a backend error, which
/// the cache must downgrade to a miss.
#[derive(Debug, Default)]
pub struct MockStore {
    entries: RwLock<HashMap<String, Value>>,
    fail: AtomicBool,
}

impl MockStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn fail_all(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Backend("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.check()?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check()?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_behaves_like_a_store() {
        let store = MockStore::new();
        store.set("a", json!(1)).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_failure_injection_hits_all_operations() {
        let store = MockStore::new();
        store.set("a", json!(1)).await.unwrap();
        store.fail_all(true);

        assert!(store.get("a").await.is_err());
        assert!(store.set("b", json!(2)).await.is_err());
        assert!(store.remove("a").await.is_err());
        assert!(store.keys().await.is_err());

        store.fail_all(false);
        assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
    }
}
