use tracing::warn;

use super::{types::Config, ConfigError};

/// Validate a loaded configuration.
///
/// A missing API key is not an error here: the resolver degrades to
/// returning no results and warns once. Structural problems are.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(base_url) = &config.tmdb.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "tmdb.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
    }

    if config.database.path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "database.path must not be empty".to_string(),
        ));
    }

    if config.tmdb.api_key.is_empty() {
        warn!("tmdb.api_key is empty, metadata lookups will be skipped");
    }

    Ok(())
}
