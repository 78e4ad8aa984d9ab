//! Genre classification for candidates.
//!
//! A known upstream category code decides the genre outright. Otherwise the
//! lower-cased title runs through an ordered keyword table where the first
//! matching rule wins, and unmatched titles resolve through a [`FallbackPolicy`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Genre;

/// Upstream category codes with a fixed genre.
const CATEGORY_GENRES: [(&str, Genre); 8] = [
    ("25", Genre::News),
    ("17", Genre::Sports),
    ("10", Genre::Music),
    ("1", Genre::Movie),
    ("24", Genre::Drama),
    ("22", Genre::Talk),
    ("20", Genre::Kids),
    ("27", Genre::Documentary),
];

/// Keyword rule: any keyword contained in the title selects the genre.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub genre: Genre,
    pub keywords: &'static [&'static str],
}

/// Title rules in priority order.
pub const TITLE_RULES: [KeywordRule; 9] = [
    KeywordRule {
        genre: Genre::News,
        keywords: &["news"],
    },
    KeywordRule {
        genre: Genre::Sports,
        keywords: &["match", "football", "sports"],
    },
    KeywordRule {
        genre: Genre::Music,
        keywords: &["music", "dj"],
    },
    KeywordRule {
        genre: Genre::Talk,
        keywords: &["podcast", "talk"],
    },
    KeywordRule {
        genre: Genre::Kids,
        keywords: &["kids", "cartoon"],
    },
    KeywordRule {
        genre: Genre::Documentary,
        keywords: &["documentary"],
    },
    KeywordRule {
        genre: Genre::Gaming,
        keywords: &["game", "gaming"],
    },
    KeywordRule {
        genre: Genre::Tech,
        keywords: &["tech", "review"],
    },
    KeywordRule {
        genre: Genre::Movie,
        keywords: &["movie", "film"],
    },
];

/// Pool for [`FallbackPolicy::Random`]; drama is reachable only through category codes.
const FALLBACK_POOL: [Genre; 10] = [
    Genre::News,
    Genre::Sports,
    Genre::Music,
    Genre::Talk,
    Genre::Movie,
    Genre::Documentary,
    Genre::Kids,
    Genre::Tech,
    Genre::Gaming,
    Genre::Variety,
];

/// What to return when neither the category nor the title identifies a genre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Always `variety`.
    #[default]
    Variety,
    /// Uniform draw from the fallback pool using the run's RNG.
    Random,
}

/// Maps a candidate's category code and title to a genre.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreClassifier {
    fallback: FallbackPolicy,
}

impl GenreClassifier {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self { fallback }
    }

    /// Classify a candidate. Never fails: every path ends in some genre.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category_id: Option<&str>,
        title: &str,
    ) -> Genre {
        if let Some(genre) = category_id.and_then(category_genre) {
            return genre;
        }
        if let Some(genre) = title_genre(title) {
            return genre;
        }
        match self.fallback {
            FallbackPolicy::Variety => Genre::Variety,
            FallbackPolicy::Random => *FALLBACK_POOL.choose(rng).unwrap_or(&Genre::Variety),
        }
    }
}

/// Genre of a known category code.
pub fn category_genre(code: &str) -> Option<Genre> {
    let code = code.trim();
    CATEGORY_GENRES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, genre)| *genre)
}

/// First title rule whose keywords appear in the title.
pub fn title_genre(title: &str) -> Option<Genre> {
    let title = title.to_lowercase();
    TITLE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| title.contains(kw)))
        .map(|rule| rule.genre)
}
