//! The assembled programming instance and its parts.
//!
//! Field names match the JSON consumed by the downstream solver, so the structs
//! serialize directly without DTO conversion.

use serde::{Deserialize, Serialize};

use super::genre::Genre;
use super::time::{DayWindow, Minute};
use crate::define_id_type;
use crate::error::{ErrorContext, GeneratorError, GeneratorResult};

define_id_type!(u32, ChannelId);

/// One scheduled content block on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub program_id: String,
    pub start: Minute,
    pub end: Minute,
    pub genre: Genre,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Program {
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }
}

/// One programming lineup spanning the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub programs: Vec<Program>,
}

impl Channel {
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Window in which a subset of channels is prioritized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBlock {
    pub start: Minute,
    pub end: Minute,
    pub allowed_channels: Vec<ChannelId>,
}

/// Window carrying a preferred genre and a bonus weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreference {
    pub start: Minute,
    pub end: Minute,
    pub preferred_genre: Genre,
    pub bonus: i32,
}

/// Full synthesized problem description handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub opening_time: Minute,
    pub closing_time: Minute,
    pub min_duration: Minute,
    /// Declared for the solver; not enforced by the generator.
    pub max_consecutive_genre: u32,
    pub channels_count: usize,
    pub switch_penalty: i32,
    pub termination_penalty: i32,
    pub priority_blocks: Vec<PriorityBlock>,
    pub time_preferences: Vec<TimePreference>,
    pub channels: Vec<Channel>,
}

impl Instance {
    pub fn day(&self) -> DayWindow {
        DayWindow::new(self.opening_time, self.closing_time)
    }

    /// Total number of programs across all channels.
    pub fn program_count(&self) -> usize {
        self.channels.iter().map(|c| c.programs.len()).sum()
    }

    /// Check every structural invariant of the instance.
    ///
    /// # Errors
    /// Returns a [`GeneratorError::Validation`] describing the first violation found.
    pub fn validate(&self) -> GeneratorResult<()> {
        let day = self.day();
        if day.is_empty() {
            return Err(GeneratorError::validation(format!(
                "opening_time {} is not before closing_time {}",
                self.opening_time, self.closing_time
            )));
        }

        let non_empty = self.channels.iter().filter(|c| !c.is_empty()).count();
        if non_empty != self.channels_count {
            return Err(GeneratorError::validation(format!(
                "channels_count is {} but {} channels carry programs",
                self.channels_count, non_empty
            )));
        }

        for (index, channel) in self.channels.iter().enumerate() {
            if channel.channel_id.index() != index {
                return Err(GeneratorError::validation_with_context(
                    format!("channel ids are not dense: expected {}", index),
                    channel_context(channel),
                ));
            }
            self.validate_channel(channel)?;
        }

        for block in &self.priority_blocks {
            if block.start < day.opening || block.end > day.closing || block.start > block.end {
                return Err(GeneratorError::validation(format!(
                    "priority block [{}, {}) lies outside the day",
                    block.start, block.end
                )));
            }
            if let Some(id) = block
                .allowed_channels
                .iter()
                .find(|id| id.index() >= self.channels.len())
            {
                return Err(GeneratorError::validation(format!(
                    "priority block references unknown channel {}",
                    id
                )));
            }
        }

        self.validate_time_preferences()
    }

    fn validate_channel(&self, channel: &Channel) -> GeneratorResult<()> {
        let (first, last) = match (channel.programs.first(), channel.programs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(()),
        };

        if first.start < self.opening_time || last.end > self.closing_time {
            return Err(GeneratorError::validation_with_context(
                format!("programs span [{}, {}) outside the day", first.start, last.end),
                channel_context(channel),
            ));
        }

        for program in &channel.programs {
            if program.end <= program.start {
                return Err(GeneratorError::validation_with_context(
                    format!("program {} has an empty interval", program.program_id),
                    channel_context(channel),
                ));
            }
        }

        for pair in channel.programs.windows(2) {
            if pair[0].end != pair[1].start {
                return Err(GeneratorError::validation_with_context(
                    format!(
                        "programs {} and {} are not contiguous",
                        pair[0].program_id, pair[1].program_id
                    ),
                    channel_context(channel),
                ));
            }
        }
        Ok(())
    }

    /// Check that every non-empty channel covers the whole day: the first program
    /// starts at opening and the uncovered tail is shorter than `min_duration`.
    ///
    /// Lineups built by the schedule builder satisfy this; single-event channels do not.
    pub fn validate_coverage(&self) -> GeneratorResult<()> {
        for channel in &self.channels {
            let (first, last) = match (channel.programs.first(), channel.programs.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            if first.start != self.opening_time {
                return Err(GeneratorError::validation_with_context(
                    format!("first program starts at {}", first.start),
                    channel_context(channel),
                ));
            }
            if self.closing_time - last.end >= self.min_duration {
                return Err(GeneratorError::validation_with_context(
                    format!("last program ends at {}", last.end),
                    channel_context(channel),
                ));
            }
        }
        Ok(())
    }

    fn validate_time_preferences(&self) -> GeneratorResult<()> {
        let mut cursor = self.opening_time;
        for pref in &self.time_preferences {
            if pref.start != cursor || pref.end < pref.start {
                return Err(GeneratorError::validation(format!(
                    "time preference [{}, {}) does not continue from {}",
                    pref.start, pref.end, cursor
                )));
            }
            cursor = pref.end;
        }
        if cursor != self.closing_time {
            return Err(GeneratorError::validation(format!(
                "time preferences end at {} instead of {}",
                cursor, self.closing_time
            )));
        }
        Ok(())
    }
}

fn channel_context(channel: &Channel) -> ErrorContext {
    ErrorContext::new("validate")
        .with_entity("channel")
        .with_entity_id(channel.channel_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str, start: Minute, end: Minute) -> Program {
        Program {
            program_id: id.to_string(),
            start,
            end,
            genre: Genre::News,
            score: 50,
            link: None,
        }
    }

    fn instance(programs: Vec<Program>) -> Instance {
        Instance {
            opening_time: 420,
            closing_time: 1380,
            min_duration: 30,
            max_consecutive_genre: 2,
            channels_count: if programs.is_empty() { 0 } else { 1 },
            switch_penalty: 3,
            termination_penalty: 15,
            priority_blocks: vec![],
            time_preferences: vec![TimePreference {
                start: 420,
                end: 1380,
                preferred_genre: Genre::Talk,
                bonus: 40,
            }],
            channels: vec![Channel {
                channel_id: ChannelId::new(0),
                channel_name: "Channel 1".to_string(),
                programs,
            }],
        }
    }

    #[test]
    fn test_valid_instance_passes() {
        let inst = instance(vec![program("CH0_P0", 420, 900), program("CH0_P1", 900, 1380)]);
        assert!(inst.validate().is_ok());
        assert_eq!(inst.program_count(), 2);
    }

    #[test]
    fn test_gap_between_programs_rejected() {
        let inst = instance(vec![program("CH0_P0", 420, 900), program("CH0_P1", 910, 1380)]);
        let err = inst.validate().unwrap_err();
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn test_uncovered_tail_fails_coverage_only() {
        let inst = instance(vec![program("CH0_P0", 420, 1300)]);
        assert!(inst.validate().is_ok());
        assert!(inst.validate_coverage().is_err());
    }

    #[test]
    fn test_late_first_program_fails_coverage() {
        let inst = instance(vec![program("CH0_P0", 600, 1380)]);
        assert!(inst.validate().is_ok());
        assert!(inst.validate_coverage().is_err());
    }

    #[test]
    fn test_program_outside_day_rejected() {
        let inst = instance(vec![program("CH0_P0", 420, 1400)]);
        assert!(inst.validate().is_err());
    }

    #[test]
    fn test_wrong_channels_count_rejected() {
        let mut inst = instance(vec![program("CH0_P0", 420, 1380)]);
        inst.channels_count = 2;
        assert!(inst.validate().is_err());
    }

    #[test]
    fn test_preference_gap_rejected() {
        let mut inst = instance(vec![program("CH0_P0", 420, 1380)]);
        inst.time_preferences = vec![TimePreference {
            start: 420,
            end: 1000,
            preferred_genre: Genre::News,
            bonus: 10,
        }];
        assert!(inst.validate().is_err());
    }

    #[test]
    fn test_link_omitted_when_absent() {
        let json = serde_json::to_value(program("CH0_P0", 420, 500)).unwrap();
        assert!(json.get("link").is_none());
        assert_eq!(json["genre"], "news");
    }

    #[test]
    fn test_channel_id_serializes_as_number() {
        let block = PriorityBlock {
            start: 420,
            end: 540,
            allowed_channels: vec![ChannelId::new(1), ChannelId::new(4)],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"start":420,"end":540,"allowed_channels":[1,4]}"#);
    }
}
