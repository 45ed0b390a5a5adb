//! Source adapter boundary and the sequential resolution loop.
//!
//! A source adapter is anything that can extract raw title strings from
//! a listing page; the pipeline parses each string, skips the unusable
//! ones, and resolves the rest one at a time.

use tracing::{debug, info};

use crate::parser::{parse, BracketHandling, ParsedQuery};
use crate::resolver::MetadataResolver;
use crate::search::MovieMatch;

/// One entity extracted from a listing page.
#[derive(Debug, Clone)]
pub struct RawEntity {
    /// Untrusted title text as scraped, noise and all.
    pub raw_title: String,
    /// Language hint derived from the source site, if it has one.
    pub detected_language: Option<String>,
}

impl RawEntity {
    pub fn new(raw_title: impl Into<String>) -> Self {
        Self {
            raw_title: raw_title.into(),
            detected_language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }
}

/// Trait for listing-page adapters.
///
/// Implementations only extract; parsing and resolution stay in the core.
pub trait TitleSource {
    /// Adapter name, for logging.
    fn name(&self) -> &str;

    /// Extract the entities currently visible on the page.
    fn entities(&self) -> Vec<RawEntity>;

    /// Parser variant for this source. Sources that pack release
    /// metadata into square brackets override this with `Strip`.
    fn bracket_handling(&self) -> BracketHandling {
        BracketHandling::Keep
    }
}

/// A resolved entity: the original input, its parsed query, and the best
/// candidate match (first result), when one was found.
#[derive(Debug, Clone)]
pub struct ResolvedEntity {
    pub entity: RawEntity,
    pub query: ParsedQuery,
    pub best: Option<MovieMatch>,
}

/// Resolve every usable entity from a source, sequentially.
///
/// One resolution completes (hit or miss, success or failure) before the
/// next begins. Entities whose parse yields an empty title are skipped.
pub async fn process_source<S: TitleSource>(
    source: &S,
    resolver: &MetadataResolver,
) -> Vec<ResolvedEntity> {
    let entities = source.entities();
    if entities.is_empty() {
        debug!("{}: no entities extracted", source.name());
        return Vec::new();
    }

    info!("{}: resolving {} entities", source.name(), entities.len());

    let mut resolved = Vec::with_capacity(entities.len());
    for entity in entities {
        let query = parse(&entity.raw_title, source.bracket_handling());
        if !query.is_usable() {
            debug!("{}: skipping '{}', no usable title", source.name(), entity.raw_title);
            continue;
        }

        let response = resolver
            .search(
                &query.title,
                query.year.as_deref(),
                entity.detected_language.as_deref(),
            )
            .await;
        let best = response.as_ref().and_then(|r| r.best()).cloned();

        match &best {
            Some(m) => debug!(
                "{}: '{}' -> '{}' ({:?}/10)",
                source.name(),
                query.title,
                m.title,
                m.vote_average
            ),
            None => debug!("{}: no match for '{}'", source.name(), query.title),
        }

        resolved.push(ResolvedEntity {
            entity,
            query,
            best,
        });
    }

    resolved
}
