//! Cache key derivation.

use crate::search::DEFAULT_LANGUAGE;

/// Prefix reserved for cache entries. The store is shared with
/// unrelated data; `clear` only touches keys carrying this prefix.
pub const CACHE_PREFIX: &str = "cinelens_cache_";

/// Sentinel year segment for queries with no year.
const YEAR_NA: &str = "na";

/// Build the deterministic storage key for `(title, year, language)`.
///
/// The title is case-folded with every non-alphanumeric character
/// replaced by `_`, so titles differing only in case or punctuation
/// style collapse to the same key. That is a deliberate precision/recall
/// trade-off: cosmetic source variance should not trigger extra fetches.
pub fn cache_key(title: &str, year: Option<&str>, language: Option<&str>) -> String {
    let safe_title: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    let year = match year {
        Some(y) if !y.is_empty() => y,
        _ => YEAR_NA,
    };

    let language = language
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_lowercase();

    format!("{}{}_{}_{}", CACHE_PREFIX, safe_title, year, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape() {
        assert_eq!(
            cache_key("The Matrix", Some("1999"), Some("en-US")),
            "cinelens_cache_the_matrix_1999_en-us"
        );
    }

    #[test]
    fn test_key_is_case_insensitive() {
        assert_eq!(
            cache_key("The Matrix", Some("1999"), Some("en-US")),
            cache_key("the matrix", Some("1999"), Some("EN-us")),
        );
    }

    #[test]
    fn test_punctuation_variants_collapse() {
        assert_eq!(
            cache_key("Spider-Man", None, None),
            cache_key("Spider Man", None, None),
        );
    }

    #[test]
    fn test_sentinels_for_absent_segments() {
        assert_eq!(cache_key("Dune", None, None), "cinelens_cache_dune_na_en-us");
        assert_eq!(
            cache_key("Dune", Some(""), Some("")),
            "cinelens_cache_dune_na_en-us"
        );
    }

    #[test]
    fn test_non_ascii_characters_are_folded() {
        assert_eq!(
            cache_key("Amélie", Some("2001"), Some("fr-FR")),
            "cinelens_cache_am_lie_2001_fr-fr"
        );
    }
}
