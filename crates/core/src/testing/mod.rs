//! Testing utilities: mocks and fixtures.
//!
//! Used by unit tests across the crate and by downstream integration
//! tests; compiled into the library so both can share them.

mod mock_backend;
mod mock_store;

pub use mock_backend::MockSearchBackend;
pub use mock_store::MockStore;

/// Fixture builders for commonly needed test data.
pub mod fixtures {
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::search::{MovieMatch, SearchResponse};

    static NEXT_ID: AtomicU32 = AtomicU32::new(1);

    /// Build a movie match with a unique id.
    pub fn movie_match(title: &str, year: u32, rating: f32) -> MovieMatch {
        MovieMatch {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            title: title.to_string(),
            release_date: Some(format!("{}-01-01", year)),
            vote_average: Some(rating),
            overview: Some(format!("Overview of {}", title)),
        }
    }

    /// Build a response carrying a single match.
    pub fn single_result(title: &str, year: u32, rating: f32) -> SearchResponse {
        SearchResponse {
            results: vec![movie_match(title, year, rating)],
        }
    }
}
