//! Remote metadata search boundary.
//!
//! The resolver talks to the remote search endpoint through the
//! [`SearchBackend`] trait; [`TmdbSearchClient`] is the production
//! implementation.

mod tmdb;

pub use tmdb::TmdbSearchClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale used when neither the user settings nor the source supply one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Errors that can occur when querying the search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend not usable (missing or rejected credential).
    #[error("Search backend not configured: {0}")]
    NotConfigured(String),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse search response: {0}")]
    Parse(String),
}

/// A fully resolved search request.
///
/// The credential travels with the request because settings can change
/// between calls; the client itself stays credential-free.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub api_key: String,
    pub query: String,
    /// Exactly four digits when present; the resolver normalizes this.
    pub year: Option<String>,
    pub language: String,
}

/// One candidate match from the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMatch {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Search response payload.
///
/// Treated as opaque by the cache except for the non-empty-results
/// predicate that decides whether it is worth storing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieMatch>,
}

impl SearchResponse {
    /// Whether the response carries at least one candidate match.
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// The first candidate, which callers treat as the best match.
    pub fn best(&self) -> Option<&MovieMatch> {
        self.results.first()
    }
}

/// Trait for movie search backends.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search for movies matching the request.
    async fn search_movies(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_predicates() {
        let empty = SearchResponse::default();
        assert!(!empty.has_results());
        assert!(empty.best().is_none());

        let response = SearchResponse {
            results: vec![
                MovieMatch {
                    id: 603,
                    title: "The Matrix".to_string(),
                    release_date: Some("1999-03-30".to_string()),
                    vote_average: Some(8.2),
                    overview: None,
                },
                MovieMatch {
                    id: 604,
                    title: "The Matrix Reloaded".to_string(),
                    release_date: None,
                    vote_average: None,
                    overview: None,
                },
            ],
        };
        assert!(response.has_results());
        assert_eq!(response.best().unwrap().id, 603);
    }

    #[test]
    fn test_response_deserialization_tolerates_extra_fields() {
        let json = r#"{
            "page": 1,
            "total_results": 1,
            "results": [
                {"id": 7, "title": "Anaconda", "release_date": "2025-06-01",
                 "vote_average": 6.1, "overview": "Snakes.", "popularity": 12.5}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Anaconda");
        assert_eq!(response.results[0].vote_average, Some(6.1));
    }

    #[test]
    fn test_response_deserialization_with_missing_optionals() {
        let json = r#"{"results": [{"id": 1, "title": "Movie"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].release_date, None);
        assert_eq!(response.results[0].vote_average, None);
    }
}
