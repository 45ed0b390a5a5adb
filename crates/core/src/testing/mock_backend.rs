//! Mock search backend for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::search::{MovieMatch, SearchBackend, SearchError, SearchRequest, SearchResponse};

/// Mock implementation of the [`SearchBackend`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movie results, filtered by query and year
/// - Track requests for assertions
/// - Simulate failures
#[derive(Debug, Default)]
pub struct MockSearchBackend {
    movies: RwLock<Vec<MovieMatch>>,
    requests: RwLock<Vec<SearchRequest>>,
    next_error: RwLock<Option<SearchError>>,
}

impl MockSearchBackend {
    /// Create a new empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a movie to the catalog served by this backend.
    pub async fn add_movie(&self, movie: MovieMatch) {
        self.movies.write().await.push(movie);
    }

    /// Replace the served catalog.
    pub async fn set_movies(&self, movies: Vec<MovieMatch>) {
        *self.movies.write().await = movies;
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<SearchRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search_movies(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.requests.write().await.push(request.clone());

        let query_lower = request.query.to_lowercase();
        let results: Vec<MovieMatch> = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| {
                let title_match = m.title.to_lowercase().contains(&query_lower);
                let year_match = request.year.as_ref().is_none_or(|y| {
                    m.release_date
                        .as_ref()
                        .is_some_and(|d| d.starts_with(y.as_str()))
                });
                title_match && year_match
            })
            .cloned()
            .collect();

        Ok(SearchResponse { results })
    }
}
