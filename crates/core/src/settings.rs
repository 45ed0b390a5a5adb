//! User settings collaborator.
//!
//! The core reads these values but never writes them; the host
//! application owns persistence and any settings UI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// User-facing settings consumed by the resolver and cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Metadata API credential. Empty means not configured.
    #[serde(default)]
    pub api_key: String,
    /// Preferred language tag (e.g. "es-ES"). Empty means "auto": fall
    /// back to the source's detected language, then the default locale.
    #[serde(default)]
    pub language: String,
    /// Whether lookups may be served from and written to the cache.
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: String::new(),
            cache_enabled: true,
        }
    }
}

/// Trait for settings providers.
///
/// Reads are asynchronous because real backends (browser sync storage,
/// config services) are.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings snapshot.
    async fn settings(&self) -> Settings;
}

/// Settings provider holding a value in memory.
///
/// Supports replacement at runtime, which tests use to flip
/// `cache_enabled` mid-run.
#[derive(Debug, Default)]
pub struct StaticSettings {
    inner: RwLock<Settings>,
}

impl StaticSettings {
    /// Create a provider serving the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    /// Replace the served settings.
    pub async fn update(&self, settings: Settings) {
        *self.inner.write().await = settings;
    }
}

#[async_trait]
impl SettingsProvider for StaticSettings {
    async fn settings(&self) -> Settings {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.language, "");
        assert!(settings.cache_enabled);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.language, "");
        assert!(settings.cache_enabled);
    }

    #[tokio::test]
    async fn test_static_provider_update() {
        let provider = StaticSettings::new(Settings::default());
        assert!(provider.settings().await.cache_enabled);

        provider
            .update(Settings {
                cache_enabled: false,
                ..Settings::default()
            })
            .await;
        assert!(!provider.settings().await.cache_enabled);
    }
}
