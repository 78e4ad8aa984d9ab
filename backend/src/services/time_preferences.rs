//! Time-of-day preference segmentation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::priority_blocks::WINDOW_JITTER;
use crate::models::{hours, DayWindow, Genre, Minute, TimePreference};

/// One themed segment of the day.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceTheme {
    pub name: &'static str,
    /// Nominal end of the segment; `None` pins it to closing
    pub anchor_end: Option<Minute>,
    pub genres: &'static [Genre],
    /// Half-open bonus range `[low, high)`
    pub bonus: (i32, i32),
}

pub const PREFERENCE_THEMES: [PreferenceTheme; 6] = [
    PreferenceTheme {
        name: "morning",
        anchor_end: Some(hours(9)),
        genres: &[Genre::News, Genre::Talk],
        bonus: (40, 80),
    },
    PreferenceTheme {
        name: "daytime",
        anchor_end: Some(hours(12)),
        genres: &[Genre::Talk, Genre::Kids, Genre::Documentary],
        bonus: (20, 45),
    },
    PreferenceTheme {
        name: "midday",
        anchor_end: Some(hours(15)),
        genres: &[Genre::Drama, Genre::Documentary],
        bonus: (25, 50),
    },
    PreferenceTheme {
        name: "afternoon",
        anchor_end: Some(hours(18)),
        genres: &[Genre::Kids, Genre::Gaming],
        bonus: (30, 55),
    },
    PreferenceTheme {
        name: "prime",
        anchor_end: Some(hours(21)),
        genres: &[Genre::Sports, Genre::Movie, Genre::Drama],
        bonus: (70, 120),
    },
    PreferenceTheme {
        name: "evening",
        anchor_end: None,
        genres: &[Genre::Music, Genre::Talk, Genre::Gaming, Genre::Variety],
        bonus: (25, 60),
    },
];

/// Partition `[opening, closing]` into six consecutive themed windows.
///
/// Boundaries are jittered by up to twenty minutes and clamped between the
/// previous boundary and closing, so the windows always tile the day exactly.
/// A window squeezed out by narrow bounds is kept with zero length.
pub fn segment_day<R: Rng + ?Sized>(rng: &mut R, day: DayWindow) -> Vec<TimePreference> {
    let mut current = day.opening;

    PREFERENCE_THEMES
        .iter()
        .map(|theme| {
            let end = match theme.anchor_end {
                Some(anchor) => {
                    let jittered = anchor + rng.gen_range(-WINDOW_JITTER..=WINDOW_JITTER);
                    jittered.min(day.closing).max(current)
                }
                None => day.closing.max(current),
            };

            let preferred_genre = *theme.genres.choose(rng).unwrap_or(&Genre::Variety);
            let bonus = rng.gen_range(theme.bonus.0..theme.bonus.1);

            let pref = TimePreference {
                start: current,
                end,
                preferred_genre,
                bonus,
            };
            current = end;
            pref
        })
        .collect()
}
