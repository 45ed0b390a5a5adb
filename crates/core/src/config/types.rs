use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::settings::Settings;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tmdb: TmdbApiConfig,
    /// Preferred language tag. Empty means "auto".
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Project the settings slice the resolver and cache consume.
    pub fn settings(&self) -> Settings {
        Settings {
            api_key: self.tmdb.api_key.clone(),
            language: self.language.clone(),
            cache_enabled: self.cache.enabled,
        }
    }
}

/// TMDB API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbApiConfig {
    /// TMDB API key. Empty means lookups are skipped.
    #[serde(default)]
    pub api_key: String,
    /// Base URL override (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

/// Cache database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cinelens.db")
}

/// Sanitized config for display and logging (secret redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tmdb: SanitizedTmdbConfig,
    pub language: String,
    pub cache: CacheConfig,
    pub database: DatabaseConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tmdb: SanitizedTmdbConfig {
                api_key_configured: !config.tmdb.api_key.is_empty(),
                base_url: config.tmdb.base_url.clone(),
            },
            language: config.language.clone(),
            cache: config.cache.clone(),
            database: config.database.clone(),
        }
    }
}
