use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Offset in minutes from midnight of the generated day.
pub type Minute = i32;

/// Minute offset of a whole hour.
pub const fn hours(hour: i32) -> Minute {
    hour * 60
}

/// Minute of day (UTC) at which a timestamp falls.
pub fn minute_of_day(dt: &DateTime<Utc>) -> Minute {
    (dt.hour() * 60 + dt.minute()) as Minute
}

/// Render a minute offset as `HH:MM` for log output.
pub fn format_hhmm(minute: Minute) -> String {
    format!("{:02}:{:02}", minute.div_euclid(60), minute.rem_euclid(60))
}

/// Broadcast day bounds `[opening, closing]` in minute offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub opening: Minute,
    pub closing: Minute,
}

impl DayWindow {
    pub fn new(opening: Minute, closing: Minute) -> Self {
        Self { opening, closing }
    }

    /// Length of the day in minutes (zero when inverted).
    pub fn span(&self) -> Minute {
        (self.closing - self.opening).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.closing <= self.opening
    }

    /// Clamp a minute offset into the window.
    pub fn clamp(&self, minute: Minute) -> Minute {
        minute.max(self.opening).min(self.closing)
    }
}
