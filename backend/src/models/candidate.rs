//! Candidate media items supplied by an acquisition source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// One item from the candidate pool. Never mutated after acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source-side video identifier
    pub id: String,
    pub title: String,
    /// Label of the channel that owns the item upstream
    pub channel_title: String,
    /// Upstream category code, when the source provides one
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Minimal candidate with no category or timestamps.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        channel_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            channel_title: channel_title.into(),
            category_id: None,
            scheduled_start: None,
            actual_start: None,
            actual_end: None,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_schedule(
        mut self,
        scheduled_start: Option<DateTime<Utc>>,
        actual_start: Option<DateTime<Utc>>,
        actual_end: Option<DateTime<Utc>>,
    ) -> Self {
        self.scheduled_start = scheduled_start;
        self.actual_start = actual_start;
        self.actual_end = actual_end;
        self
    }

    /// Public watch link for this item.
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_PREFIX, self.id)
    }

    /// Best known start: the actual start if the stream began, else the scheduled one.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.actual_start.or(self.scheduled_start)
    }
}
