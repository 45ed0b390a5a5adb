//! Cache-backed metadata resolution.
//!
//! One `search` call performs at most one useful network round-trip per
//! distinct `(title, year, language)` key inside the freshness window.
//! Every failure path returns `None`: a bad lookup costs one missing
//! rating, never an aborted batch.

use std::sync::{Arc, Once};

use tracing::{debug, warn};

use crate::cache::FreshnessCache;
use crate::search::{SearchBackend, SearchRequest, SearchResponse, DEFAULT_LANGUAGE};
use crate::settings::SettingsProvider;
use crate::store::KvStore;

/// Orchestrates settings, cache and the remote search backend.
pub struct MetadataResolver {
    settings: Arc<dyn SettingsProvider>,
    backend: Arc<dyn SearchBackend>,
    cache: FreshnessCache,
    missing_key_warning: Once,
}

impl MetadataResolver {
    /// Create a resolver over the given collaborators.
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        backend: Arc<dyn SearchBackend>,
        store: Arc<dyn KvStore>,
    ) -> Self {
        let cache = FreshnessCache::new(store, settings.clone());
        Self {
            settings,
            backend,
            cache,
            missing_key_warning: Once::new(),
        }
    }

    /// The cache layer, exposed for management operations like flushing.
    pub fn cache(&self) -> &FreshnessCache {
        &self.cache
    }

    /// Resolve metadata for a title.
    ///
    /// Returns the cached or freshly fetched response, or `None` when the
    /// input is unusable, no credential is configured, or the fetch
    /// failed. Empty-result responses are returned but not cached, so a
    /// title missing from the catalog today is retried tomorrow.
    pub async fn search(
        &self,
        title: &str,
        year: Option<&str>,
        detected_language: Option<&str>,
    ) -> Option<SearchResponse> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let settings = self.settings.settings().await;

        // User preference wins, then the source's detected language.
        let language = if !settings.language.is_empty() {
            settings.language.clone()
        } else {
            detected_language
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_string()
        };

        if settings.api_key.is_empty() {
            self.missing_key_warning
                .call_once(|| warn!("no API key configured, metadata lookups are disabled"));
            return None;
        }

        // Anything that is not exactly four digits is treated as absent.
        let year = year.filter(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()));

        if let Some(cached) = self.cache.get(title, year, Some(&language)).await {
            debug!("cache hit for '{}'", title);
            return Some(cached);
        }

        let request = SearchRequest {
            api_key: settings.api_key,
            query: title.to_string(),
            year: year.map(str::to_string),
            language: language.clone(),
        };

        let response = match self.backend.search_movies(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("metadata search failed for '{}': {}", title, e);
                return None;
            }
        };

        if response.has_results() {
            // Fire-and-forget: a failed write is logged inside the cache
            // and must not delay or fail the caller.
            let cache = self.cache.clone();
            let payload = response.clone();
            let title = title.to_string();
            let year = year.map(str::to_string);
            tokio::spawn(async move {
                cache
                    .set(&title, year.as_deref(), Some(&language), &payload)
                    .await;
            });
        }

        Some(response)
    }
}
