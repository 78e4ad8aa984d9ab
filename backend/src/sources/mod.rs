//! Candidate acquisition.
//!
//! A [`CandidateSource`] turns a [`CandidateQuery`] into a candidate pool. The
//! generator awaits exactly one fetch per run; everything after that is
//! synchronous.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::SourceSettings;
use crate::error::GeneratorResult;
use crate::models::Candidate;

pub mod local;
#[cfg(feature = "youtube-source")]
pub mod youtube;

pub use local::StaticSource;
#[cfg(feature = "youtube-source")]
pub use youtube::YouTubeSource;

/// Upper bound the search endpoint accepts for one page.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Which broadcasts to ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcquisitionMode {
    /// Streams broadcasting right now
    #[default]
    LiveNow,
    /// Scheduled broadcasts that have not started
    Upcoming,
    /// Broadcasts that already ended
    Past,
}

impl AcquisitionMode {
    /// Value of the search endpoint's `eventType` parameter.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LiveNow => "live",
            Self::Upcoming => "upcoming",
            Self::Past => "completed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiveNow => "live-now",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }

    /// Day offsets relative to now used when the configuration gives none.
    fn default_window(&self) -> Option<(i64, i64)> {
        match self {
            Self::LiveNow => None,
            Self::Upcoming => Some((0, 2)),
            Self::Past => Some((-1, 0)),
        }
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquisitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live-now" | "live_now" | "live" | "now" => Ok(Self::LiveNow),
            "upcoming" | "future" => Ok(Self::Upcoming),
            "past" | "completed" => Ok(Self::Past),
            other => Err(format!(
                "Unknown acquisition mode '{}'. Valid options: live-now, upcoming, past",
                other
            )),
        }
    }
}

/// One acquisition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub mode: AcquisitionMode,
    pub query: String,
    pub max_results: u32,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
}

impl CandidateQuery {
    /// Build the query for `settings` relative to `now`.
    ///
    /// Live requests carry no time window. Upcoming and past requests use the
    /// configured day offsets, falling back to the mode's default window for
    /// whichever side is missing. `max_results` is clamped to the page limit.
    pub fn from_settings(settings: &SourceSettings, now: DateTime<Utc>) -> Self {
        let (published_after, published_before) = match settings.mode.default_window() {
            None => (None, None),
            Some((default_from, default_to)) => {
                let from = settings.days_from.unwrap_or(default_from);
                let to = settings.days_to.unwrap_or(default_to).max(from);
                (
                    Some(now + Duration::days(from)),
                    Some(now + Duration::days(to)),
                )
            }
        };

        Self {
            mode: settings.mode,
            query: settings.query.clone(),
            max_results: settings.max_results.clamp(1, MAX_RESULTS_LIMIT),
            published_after,
            published_before,
        }
    }
}

/// Supplier of the candidate pool.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch the candidate pool for `query`.
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - Possibly empty pool
    /// * `Err(GeneratorError::Acquisition)` - If the source could not be reached or parsed
    async fn fetch_candidates(&self, query: &CandidateQuery) -> GeneratorResult<Vec<Candidate>>;
}
