//! Instance assembly.
//!
//! The assembler is the only component that sees the whole run: it allocates
//! candidates to channels, builds every channel, then samples the priority
//! blocks and time preferences once and freezes everything into an [`Instance`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::allocation::AllocationStrategy;
use super::channel_schedule::ChannelScheduleBuilder;
use super::genre::GenreClassifier;
use super::priority_blocks::sample_priority_blocks;
use super::time_preferences::segment_day;
use crate::config::{GenerationSettings, GeneratorConfig, InstanceSettings};
use crate::error::{ErrorContext, GeneratorError, GeneratorResult};
use crate::models::{
    format_hhmm, minute_of_day, Candidate, Channel, ChannelId, DayWindow, Instance, Minute,
    Program,
};

/// What happens to channels that end up without programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyChannelPolicy {
    /// Leave them out; channel ids stay dense over the kept channels.
    #[default]
    Drop,
    /// Keep them with an empty program list.
    Keep,
}

/// Turns a candidate pool into an immutable [`Instance`].
#[derive(Debug, Clone)]
pub struct InstanceAssembler {
    instance: InstanceSettings,
    generation: GenerationSettings,
    builder: ChannelScheduleBuilder,
    classifier: GenreClassifier,
    include_links: bool,
}

impl Default for InstanceAssembler {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl InstanceAssembler {
    pub fn new(
        instance: InstanceSettings,
        generation: GenerationSettings,
        include_links: bool,
    ) -> Self {
        Self {
            builder: ChannelScheduleBuilder::from_settings(&generation),
            classifier: GenreClassifier::new(generation.fallback_genre),
            instance,
            generation,
            include_links,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.instance.clone(),
            config.generation.clone(),
            config.source.include_links,
        )
    }

    pub fn day(&self) -> DayWindow {
        DayWindow::new(self.instance.opening_time, self.instance.closing_time)
    }

    /// Reject settings the builders cannot work with.
    ///
    /// # Errors
    /// Returns a [`GeneratorError::Configuration`] naming the offending setting.
    pub fn check_settings(&self) -> GeneratorResult<()> {
        let context = || ErrorContext::new("assemble").with_entity("config");
        let InstanceSettings {
            opening_time,
            closing_time,
            min_duration,
            ..
        } = self.instance;

        if opening_time >= closing_time {
            return Err(GeneratorError::configuration_with_context(
                format!(
                    "opening_time ({}) must be before closing_time ({})",
                    opening_time, closing_time
                ),
                context(),
            ));
        }
        if min_duration <= 0 {
            return Err(GeneratorError::configuration_with_context(
                format!("min_duration must be positive, got {}", min_duration),
                context(),
            ));
        }
        if self.generation.duration_cap < min_duration {
            return Err(GeneratorError::configuration_with_context(
                format!(
                    "duration_cap ({}) must be at least min_duration ({})",
                    self.generation.duration_cap, min_duration
                ),
                context(),
            ));
        }
        if self.generation.score_min > self.generation.score_max {
            return Err(GeneratorError::configuration_with_context(
                format!(
                    "score range {}..={} is empty",
                    self.generation.score_min, self.generation.score_max
                ),
                context(),
            ));
        }
        if !(0.0..=1.0).contains(&self.generation.genre_retention) {
            return Err(GeneratorError::configuration_with_context(
                format!(
                    "genre_retention must lie in [0, 1], got {}",
                    self.generation.genre_retention
                ),
                context(),
            ));
        }
        Ok(())
    }

    /// Assemble an instance from `candidates` spread over at most `channel_count` channels.
    ///
    /// An empty pool is not an error: it yields an instance without channels but
    /// with the full set of time preferences.
    ///
    /// # Errors
    /// Returns a configuration error when the day bounds or engine settings are degenerate.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        candidates: &[Candidate],
        channel_count: usize,
        strategy: AllocationStrategy,
    ) -> GeneratorResult<Instance> {
        self.check_settings()?;
        let day = self.day();
        let min_duration = self.instance.min_duration;

        let slots = strategy.allocate(rng, candidates, channel_count);
        log::info!(
            "Allocated {} candidates to {} channel slots ({:?})",
            candidates.len(),
            slots.len(),
            strategy
        );

        let mut channels: Vec<Channel> = Vec::with_capacity(slots.len());
        for slot in &slots {
            let channel_id = ChannelId::new(channels.len() as u32);
            let (channel_name, programs) = match strategy {
                AllocationStrategy::RoundRobin { .. } => (
                    format!("Channel {}", channel_id.value() + 1),
                    self.build_lineup(rng, channel_id, slot),
                ),
                AllocationStrategy::OnePerChannel => match slot.first() {
                    Some(candidate) => (
                        event_channel_name(candidate, channel_id),
                        self.event_program(rng, channel_id, candidate)
                            .into_iter()
                            .collect(),
                    ),
                    None => (format!("Channel {}", channel_id.value() + 1), Vec::new()),
                },
            };

            if programs.is_empty() && self.generation.empty_channels == EmptyChannelPolicy::Drop {
                log::debug!("Dropping empty channel slot (would have been {})", channel_id);
                continue;
            }

            channels.push(Channel {
                channel_id,
                channel_name,
                programs,
            });
        }

        let channels_count = channels.iter().filter(|c| !c.is_empty()).count();
        let priority_blocks = sample_priority_blocks(rng, day, channels.len());
        let time_preferences = segment_day(rng, day);

        log::info!(
            "Assembled {} channels ({} non-empty) over {}-{} ({} min)",
            channels.len(),
            channels_count,
            format_hhmm(day.opening),
            format_hhmm(day.closing),
            day.span()
        );

        Ok(Instance {
            opening_time: day.opening,
            closing_time: day.closing,
            min_duration,
            max_consecutive_genre: self.instance.max_consecutive_genre,
            channels_count,
            switch_penalty: self.instance.switch_penalty,
            termination_penalty: self.instance.termination_penalty,
            priority_blocks,
            time_preferences,
            channels,
        })
    }

    /// Full-day lineup for a round-robin slot; empty when the slot has no candidates.
    fn build_lineup<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        channel_id: ChannelId,
        slot: &[&Candidate],
    ) -> Vec<Program> {
        let representative = match slot.first() {
            Some(candidate) => candidate,
            None => return Vec::new(),
        };
        let base_genre = self.classifier.classify(
            rng,
            representative.category_id.as_deref(),
            &representative.title,
        );
        let links: Vec<String> = if self.include_links {
            slot.iter().map(|c| c.watch_url()).collect()
        } else {
            Vec::new()
        };

        self.builder.build(
            rng,
            channel_id,
            self.day(),
            self.instance.min_duration,
            base_genre,
            &links,
        )
    }

    /// Single program spanning a candidate's own timestamps, clipped to the day.
    ///
    /// Start is the minute of day (UTC) of the actual or scheduled start; the end
    /// follows the actual end when known, otherwise `duration_cap` minutes later.
    /// Returns `None` when the candidate has no start or the clipped span is
    /// shorter than `min_duration`.
    fn event_program<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        channel_id: ChannelId,
        candidate: &Candidate,
    ) -> Option<Program> {
        let day = self.day();
        let started = candidate.start_time()?;
        let start = minute_of_day(&started);
        let length = match candidate.actual_end {
            Some(ended) if ended > started => {
                Minute::try_from((ended - started).num_minutes()).unwrap_or(Minute::MAX)
            }
            _ => self.generation.duration_cap,
        };

        let (start, end) = (day.clamp(start), day.clamp(start.saturating_add(length)));
        if end - start < self.instance.min_duration {
            log::debug!(
                "Candidate {} spans [{}, {}) after clipping; skipped",
                candidate.id,
                start,
                end
            );
            return None;
        }

        let genre = self
            .classifier
            .classify(rng, candidate.category_id.as_deref(), &candidate.title);
        Some(Program {
            program_id: format!("CH{}_P0", channel_id),
            start,
            end,
            genre,
            score: rng.gen_range(self.generation.score_min..=self.generation.score_max),
            link: self.include_links.then(|| candidate.watch_url()),
        })
    }
}

fn event_channel_name(candidate: &Candidate, channel_id: ChannelId) -> String {
    let label = candidate.channel_title.trim();
    if label.is_empty() {
        format!("Channel {}", channel_id.value() + 1)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod assembler_tests;
