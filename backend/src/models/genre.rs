//! Closed genre vocabulary shared by programs and time preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content type tag attached to every program and time preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    News,
    Sports,
    Music,
    Talk,
    Movie,
    Documentary,
    Kids,
    Tech,
    Gaming,
    Variety,
    Drama,
}

impl Genre {
    /// Every genre, in the order used for uniform draws.
    pub const ALL: [Genre; 11] = [
        Genre::News,
        Genre::Sports,
        Genre::Music,
        Genre::Gaming,
        Genre::Talk,
        Genre::Movie,
        Genre::Documentary,
        Genre::Kids,
        Genre::Tech,
        Genre::Variety,
        Genre::Drama,
    ];

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::News => "news",
            Genre::Sports => "sports",
            Genre::Music => "music",
            Genre::Talk => "talk",
            Genre::Movie => "movie",
            Genre::Documentary => "documentary",
            Genre::Kids => "kids",
            Genre::Tech => "tech",
            Genre::Gaming => "gaming",
            Genre::Variety => "variety",
            Genre::Drama => "drama",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown genre: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_serializes_lowercase() {
        let json = serde_json::to_string(&Genre::Documentary).unwrap();
        assert_eq!(json, "\"documentary\"");
    }

    #[test]
    fn test_genre_round_trips_through_str() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn test_unknown_genre_rejected() {
        assert!("opera".parse::<Genre>().is_err());
    }

    #[test]
    fn test_all_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = Genre::ALL.iter().collect();
        assert_eq!(unique.len(), Genre::ALL.len());
    }
}
