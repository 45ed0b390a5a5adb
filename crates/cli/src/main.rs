//! Command-line front end: resolves raw titles given as arguments and
//! prints the best match for each.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinelens_core::{
    load_config, parse, validate_config, BracketHandling, KvStore, MetadataResolver,
    SanitizedConfig, SearchBackend, SettingsProvider, SqliteStore, StaticSettings, TmdbSearchClient,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut raw_titles: Vec<String> = std::env::args().skip(1).collect();
    if raw_titles.is_empty() {
        eprintln!("usage: cinelens [--flush-cache] <raw title>...");
        return Ok(());
    }
    let flush_cache = raw_titles.first().map(String::as_str) == Some("--flush-cache");
    if flush_cache {
        raw_titles.remove(0);
    }

    let config_path = std::env::var("CINELENS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded: {:?}", SanitizedConfig::from(&config));

    let settings: Arc<dyn SettingsProvider> = Arc::new(StaticSettings::new(config.settings()));
    let backend: Arc<dyn SearchBackend> = match &config.tmdb.base_url {
        Some(url) => Arc::new(TmdbSearchClient::with_base_url(url.clone())?),
        None => Arc::new(TmdbSearchClient::new()?),
    };
    let store: Arc<dyn KvStore> = Arc::new(
        SqliteStore::new(&config.database.path).context("Failed to open cache database")?,
    );
    let resolver = MetadataResolver::new(settings, backend, store);

    if flush_cache {
        let removed = resolver.cache().clear().await;
        info!("Flushed {} cached lookups", removed);
    }

    for raw in raw_titles {
        let query = parse(&raw, BracketHandling::Keep);
        if !query.is_usable() {
            warn!("no usable title in '{}'", raw);
            continue;
        }

        match resolver
            .search(&query.title, query.year.as_deref(), None)
            .await
            .as_ref()
            .and_then(|r| r.best())
        {
            Some(best) => {
                let rating = best
                    .vote_average
                    .map(|r| format!("{:.1}/10", r))
                    .unwrap_or_else(|| "unrated".to_string());
                let year = best
                    .release_date
                    .as_deref()
                    .and_then(|d| d.get(..4))
                    .unwrap_or("----");
                println!("{} -> {} ({}) {}", query.title, best.title, year, rating);
            }
            None => println!("{} -> no match", query.title),
        }
    }

    // Give detached cache writes a moment to flush before exit.
    tokio::time::sleep(Duration::from_millis(50)).await;

    Ok(())
}
