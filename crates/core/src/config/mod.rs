//! File and environment configuration.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::{CacheConfig, Config, DatabaseConfig, SanitizedConfig, TmdbApiConfig};
pub use validate::validate_config;

use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist.
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// Config could not be parsed.
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Config parsed but carries an invalid value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
