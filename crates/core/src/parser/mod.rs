//! Title normalization for noisy listing strings.
//!
//! Listing pages hand us strings like "Anaconda (2025) HD 1080p y 720p
//! Latino Castellano" or filename-style "Matrix.1999.1080p.BluRay.x264".
//! This module turns them into a clean `(title, year)` query. The transform
//! order is load-bearing: year extraction runs before noise removal so a
//! parenthesized year can truncate trailing garbage, and separator
//! normalization runs before trailing-token cleanup.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// How `[...]` spans in the raw text are treated.
///
/// Some sources encode release metadata inside square brackets
/// (e.g. "Title [1080p Dual]") and need the aggressive variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketHandling {
    /// Leave bracketed spans in place (a bracketed year still counts as
    /// a structured year).
    #[default]
    Keep,
    /// Remove every `[...]` span before any other processing.
    Strip,
}

/// A normalized search query extracted from raw listing text.
///
/// An empty `title` means the input had no usable title; callers are
/// expected to filter on [`ParsedQuery::is_usable`] before resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub title: String,
    /// Four-digit year in the `19xx`/`20xx` range, when one was found.
    pub year: Option<String>,
}

impl ParsedQuery {
    /// Whether the parse produced a non-empty title worth resolving.
    pub fn is_usable(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Year enclosed in parentheses or brackets. Everything after it is
/// treated as disposable metadata.
static STRUCTURED_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(\[]\s*((?:19|20)\d{2})\s*[)\]]").unwrap());

/// Bare year bounded by non-digits or string edges. Extraction only,
/// never truncation: titles like "2001: A Space Odyssey" must survive.
static LOOSE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").unwrap());

static BRACKET_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static TRAILING_Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+y$").unwrap());

/// Resolution, source/encoding and release descriptor tokens stripped
/// from titles. Word-boundary anchored so real title words survive.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b\d{3,4}p\b",
        r"(?i)\b4k\b",
        r"(?i)\b(?:full)?\s*hd\b",
        r"(?i)\buhd\b",
        r"(?i)\bbluray\b",
        r"(?i)\bweb-?dl\b",
        r"(?i)\bweb-?rip\b",
        r"(?i)\bhdrip\b",
        r"(?i)\bhdr10\b",
        r"(?i)\bdvdrip\b",
        r"(?i)\bh\.?26[45]\b",
        r"(?i)\bx26[45]\b",
        r"(?i)\bhevc\b",
        r"(?i)\blatino\b",
        r"(?i)\bcastellano\b",
        r"(?i)\bdual\b",
        r"(?i)\bsub(?:titulada)?\b",
        r"(?i)\bmulti\b",
        r"(?i)\bextended\b",
        r"(?i)\bdirector'?s\s*cut\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Parse raw listing text into a clean `(title, year)` query.
///
/// Best-effort and deterministic: never fails, returns an empty title
/// when nothing usable remains after stripping.
pub fn parse(raw: &str, brackets: BracketHandling) -> ParsedQuery {
    if raw.trim().is_empty() {
        return ParsedQuery {
            title: String::new(),
            year: None,
        };
    }

    let mut text = match brackets {
        BracketHandling::Strip => BRACKET_SPAN.replace_all(raw, " ").into_owned(),
        BracketHandling::Keep => raw.to_string(),
    };
    let mut year: Option<String> = None;

    // Structured year first: a strong signal that the rest of the string
    // is release metadata, so truncate at the match. When the year opens
    // the string, excise just the match instead to avoid an empty title.
    let mut structured: Option<(usize, usize, String)> = None;
    if let Some(caps) = STRUCTURED_YEAR.captures(&text) {
        if let (Some(whole), Some(y)) = (caps.get(0), caps.get(1)) {
            structured = Some((whole.start(), whole.end(), y.as_str().to_string()));
        }
    }
    if let Some((start, end, y)) = structured {
        year = Some(y);
        if start > 0 {
            text.truncate(start);
        } else {
            text.replace_range(start..end, " ");
        }
    } else if let Some(caps) = LOOSE_YEAR.captures(&text) {
        if let Some(y) = caps.get(1) {
            year = Some(y.as_str().to_string());
        }
    }

    for pattern in NOISE_PATTERNS.iter() {
        if pattern.is_match(&text) {
            text = pattern.replace_all(&text, " ").into_owned();
        }
    }

    // Filename-style separators become spaces, then whitespace collapses.
    let text: String = text
        .chars()
        .map(|c| if matches!(c, '.' | '_' | '-') { ' ' } else { c })
        .collect();
    let mut title = text.split_whitespace().collect::<Vec<_>>().join(" ");

    // Sources that write the year as plain trailing text ("Title 1999")
    // leave it behind after noise removal; drop it when it matches the
    // extracted year as a standalone trailing word.
    if let Some(y) = &year {
        if title == *y {
            title.clear();
        } else if let Some(stripped) = title.strip_suffix(y.as_str()) {
            if stripped.ends_with(' ') {
                title.truncate(stripped.trim_end().len());
            }
        }
    }

    // List-style sources produce "Title y Quality"; once the quality tags
    // are gone a dangling Spanish conjunction remains.
    if let Some(m) = TRAILING_Y.find(&title) {
        title.truncate(m.start());
    }

    ParsedQuery { title, year }
}
