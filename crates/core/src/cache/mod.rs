//! Freshness-bounded lookup cache.
//!
//! Wraps the abstract key-value store with timestamped entries, a 7-day
//! TTL checked on every read, and lazy deletion of expired entries. The
//! cache is strictly an optimization layer: store failures and malformed
//! entries degrade to misses, never to errors.

mod key;

pub use key::{cache_key, CACHE_PREFIX};

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::search::SearchResponse;
use crate::settings::SettingsProvider;
use crate::store::KvStore;

/// Maximum entry age in milliseconds before it is treated as absent.
pub const CACHE_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// A stored cache entry. Never mutated in place; a fresh write fully
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Write time, unix milliseconds.
    pub timestamp: i64,
    pub payload: SearchResponse,
}

/// TTL-checking cache over an abstract key-value store.
///
/// Cheap to clone; clones share the same store and settings.
#[derive(Clone)]
pub struct FreshnessCache {
    store: Arc<dyn KvStore>,
    settings: Arc<dyn SettingsProvider>,
}

impl FreshnessCache {
    /// Create a cache over the given store and settings collaborator.
    pub fn new(store: Arc<dyn KvStore>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self { store, settings }
    }

    /// Whether caching is enabled in the user settings. When disabled,
    /// `get` always misses and `set` never writes.
    pub async fn is_enabled(&self) -> bool {
        self.settings.settings().await.cache_enabled
    }

    /// Look up a fresh entry for `(title, year, language)`.
    ///
    /// Expired entries are deleted best-effort and reported as misses.
    pub async fn get(
        &self,
        title: &str,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Option<SearchResponse> {
        if !self.is_enabled().await {
            return None;
        }

        let key = cache_key(title, year, language);
        let raw = match self.store.get(&key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!("cache read failed for '{}', treating as miss: {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("malformed cache entry at '{}', treating as miss: {}", key, e);
                return None;
            }
        };

        let age_ms = Utc::now().timestamp_millis() - entry.timestamp;
        if age_ms > CACHE_TTL_MS {
            debug!("cache entry expired for '{}' (age {}ms)", title, age_ms);
            if let Err(e) = self.store.remove(&key).await {
                warn!("failed to delete expired cache entry '{}': {}", key, e);
            }
            return None;
        }

        Some(entry.payload)
    }

    /// Store a payload for `(title, year, language)`, overwriting any
    /// prior entry. Callers decide what is worth caching; failures are
    /// logged and swallowed.
    pub async fn set(
        &self,
        title: &str,
        year: Option<&str>,
        language: Option<&str>,
        payload: &SearchResponse,
    ) {
        if !self.is_enabled().await {
            return;
        }

        let key = cache_key(title, year, language);
        let entry = CacheEntry {
            timestamp: Utc::now().timestamp_millis(),
            payload: payload.clone(),
        };

        match serde_json::to_value(&entry) {
            Ok(value) => {
                if let Err(e) = self.store.set(&key, value).await {
                    warn!("cache write failed for '{}': {}", key, e);
                }
            }
            Err(e) => warn!("failed to encode cache entry for '{}': {}", key, e),
        }
    }

    /// Delete every entry carrying the cache prefix, leaving unrelated
    /// keys in the shared store untouched. Returns the number removed.
    /// Not atomic: a partial run leaves a subset cleared.
    pub async fn clear(&self) -> usize {
        let keys = match self.store.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("cache clear failed to enumerate keys: {}", e);
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(CACHE_PREFIX)) {
            match self.store.remove(key).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("cache clear failed to remove '{}': {}", key, e),
            }
        }

        if removed > 0 {
            info!("flushed {} cached lookups", removed);
        }
        removed
    }
}
