//! Synthesis engine.
//!
//! Each submodule owns one step of turning a candidate pool into an instance:
//! genre classification, duration sampling, per-channel lineups, priority
//! blocks, time preferences and the final assembly. [`pipeline`] wires them to
//! a candidate source.

pub mod allocation;
pub mod assembler;
pub mod channel_schedule;
pub mod duration;
pub mod genre;
pub mod pipeline;
pub mod priority_blocks;
pub mod time_preferences;

pub use allocation::AllocationStrategy;
pub use assembler::{EmptyChannelPolicy, InstanceAssembler};
pub use channel_schedule::ChannelScheduleBuilder;
pub use duration::sample_duration;
pub use genre::{FallbackPolicy, GenreClassifier};
pub use pipeline::{generate, resolve_seed};
pub use priority_blocks::sample_priority_blocks;
pub use time_preferences::segment_day;
