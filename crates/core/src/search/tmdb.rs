//! TMDB (The Movie Database) search client.
//!
//! Issues `/search/movie` requests pinned to the first result page with
//! adult content excluded. The API key arrives with each request rather
//! than at construction time, so settings changes take effect without
//! rebuilding the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{SearchBackend, SearchError, SearchRequest, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB search client.
pub struct TmdbSearchClient {
    client: Client,
    base_url: String,
}

impl TmdbSearchClient {
    /// Create a client against the public TMDB API.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (useful for testing
    /// against a local stub).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SearchBackend for TmdbSearchClient {
    async fn search_movies(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!(
            "TMDB movie search: query='{}', year={:?}, language={}",
            request.query, request.year, request.language
        );

        let mut req = self.client.get(&url).query(&[
            ("api_key", request.api_key.as_str()),
            ("query", request.query.as_str()),
            ("language", request.language.as_str()),
            ("page", "1"),
            ("include_adult", "false"),
        ]);

        if let Some(year) = &request.year {
            req = req.query(&[("primary_release_year", year.as_str())]);
        }

        let response = req.send().await?;

        let status = response.status();
        if status == 401 {
            return Err(SearchError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Parse(format!("Failed to parse movie search response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = TmdbSearchClient::new().unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);

        let client = TmdbSearchClient::with_base_url("http://localhost:9000").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
