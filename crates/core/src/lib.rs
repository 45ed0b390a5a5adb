//! CineLens core: overlays third-party rating metadata onto movie
//! listing pages.
//!
//! The pipeline turns noisy scraped title strings into canonical
//! `(title, year)` queries ([`parser`]), resolves them against a remote
//! metadata search API ([`search`], [`resolver`]) and bounds network
//! traffic with a TTL cache over an abstract key-value store ([`cache`],
//! [`store`]).

pub mod cache;
pub mod config;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod search;
pub mod settings;
pub mod store;
pub mod testing;

pub use cache::{cache_key, CacheEntry, FreshnessCache, CACHE_PREFIX, CACHE_TTL_MS};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use parser::{parse, BracketHandling, ParsedQuery};
pub use pipeline::{process_source, RawEntity, ResolvedEntity, TitleSource};
pub use resolver::MetadataResolver;
pub use search::{
    MovieMatch, SearchBackend, SearchError, SearchRequest, SearchResponse, TmdbSearchClient,
    DEFAULT_LANGUAGE,
};
pub use settings::{Settings, SettingsProvider, StaticSettings};
pub use store::{KvStore, MemoryStore, SqliteStore, StoreError};
