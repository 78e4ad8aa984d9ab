//! # Instance Generator
//!
//! Synthesizes TV-style programming instances for a downstream scheduling
//! solver from a pool of YouTube broadcasts.
//!
//! ## Features
//!
//! - **Acquisition**: live, upcoming or past broadcasts from the YouTube Data API
//! - **Synthesis**: genre classification, skewed duration sampling and
//!   contiguous full-day lineups per channel
//! - **Constraints**: priority blocks and time-of-day genre preferences
//! - **Output**: JSON instance, CSV debug dump and a SHA-256 fingerprint
//!
//! ## Architecture
//!
//! - [`models`]: candidates, genres, minute offsets and the instance itself
//! - [`services`]: the synthesis engine and the generation pipeline
//! - [`sources`]: candidate sources behind the [`sources::CandidateSource`] trait
//! - [`io`]: instance and debug writers
//! - [`config`]: TOML and environment configuration
//! - [`error`]: the crate-wide [`error::GeneratorError`]
//!
//! Every random draw goes through an explicit RNG argument, so a seeded
//! `ChaCha8Rng` reproduces a run exactly.

// GeneratorError carries a rich context struct
#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod sources;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use models::Instance;
