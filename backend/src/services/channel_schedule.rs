//! Contiguous per-channel timeline construction.

use rand::seq::SliceRandom;
use rand::Rng;

use super::duration::sample_duration;
use crate::config::GenerationSettings;
use crate::models::{ChannelId, DayWindow, Genre, Minute, Program};

/// Fills a channel's day with back-to-back programs.
///
/// Invariants of the output:
/// - the first program starts at `opening`
/// - each program ends where the next one starts
/// - every program lasts at least `min_duration`
/// - the uncovered tail before `closing` is shorter than `min_duration`
#[derive(Debug, Clone)]
pub struct ChannelScheduleBuilder {
    duration_cap: Minute,
    score_min: i32,
    score_max: i32,
    genre_retention: f64,
}

impl Default for ChannelScheduleBuilder {
    fn default() -> Self {
        Self::from_settings(&GenerationSettings::default())
    }
}

impl ChannelScheduleBuilder {
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self {
            duration_cap: settings.duration_cap,
            score_min: settings.score_min,
            score_max: settings.score_max,
            genre_retention: settings.genre_retention,
        }
    }

    /// Build the program sequence of one channel.
    ///
    /// `links` are attached to programs in rotation; pass an empty slice to omit links.
    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        channel_id: ChannelId,
        day: DayWindow,
        min_duration: Minute,
        base_genre: Genre,
        links: &[String],
    ) -> Vec<Program> {
        let mut programs = Vec::new();
        let mut current = day.opening;

        while day.closing - current >= min_duration {
            let remaining = day.closing - current;
            let duration = sample_duration(rng, min_duration, self.duration_cap.min(remaining));

            let mut end = current + duration;
            if day.closing - end < min_duration {
                end = day.closing;
            }

            let index = programs.len();
            programs.push(Program {
                program_id: format!("CH{}_P{}", channel_id, index),
                start: current,
                end,
                genre: self.pick_genre(rng, base_genre),
                score: rng.gen_range(self.score_min..=self.score_max),
                link: links.get(index % links.len().max(1)).cloned(),
            });

            current = end;
        }

        log::debug!(
            "Channel {} built with {} programs ending at {}",
            channel_id,
            programs.len(),
            current
        );
        programs
    }

    /// Keep the channel's dominant genre with the retention probability, otherwise
    /// draw uniformly from every genre.
    fn pick_genre<R: Rng + ?Sized>(&self, rng: &mut R, base_genre: Genre) -> Genre {
        if rng.gen::<f64>() < self.genre_retention {
            return base_genre;
        }
        *Genre::ALL.choose(rng).unwrap_or(&base_genre)
    }
}
