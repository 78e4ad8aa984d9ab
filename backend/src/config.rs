//! Generator configuration.
//!
//! Settings come from an optional TOML file (`instance-gen.toml`) with serde
//! defaults for every field, followed by `GENERATOR_*` environment overrides.
//! The API credential is only ever read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorContext, GeneratorError, GeneratorResult};
use crate::models::Minute;
use crate::services::assembler::EmptyChannelPolicy;
use crate::services::genre::FallbackPolicy;
use crate::sources::AcquisitionMode;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "instance-gen.toml";

/// Environment variable holding the acquisition API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Complete configuration of a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub instance: InstanceSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Day bounds and the solver constants copied verbatim into the instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSettings {
    #[serde(default = "default_opening_time")]
    pub opening_time: Minute,
    #[serde(default = "default_closing_time")]
    pub closing_time: Minute,
    #[serde(default = "default_min_duration")]
    pub min_duration: Minute,
    #[serde(default = "default_max_consecutive_genre")]
    pub max_consecutive_genre: u32,
    #[serde(default = "default_switch_penalty")]
    pub switch_penalty: i32,
    #[serde(default = "default_termination_penalty")]
    pub termination_penalty: i32,
}

/// Knobs of the synthesis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Longest program the duration sampler may draw, in minutes
    #[serde(default = "default_duration_cap")]
    pub duration_cap: Minute,
    #[serde(default = "default_score_min")]
    pub score_min: i32,
    #[serde(default = "default_score_max")]
    pub score_max: i32,
    /// Probability that a program keeps its channel's dominant genre
    #[serde(default = "default_genre_retention")]
    pub genre_retention: f64,
    /// Round-robin allocation tops every channel up to this many candidates
    #[serde(default = "default_min_programs_per_channel")]
    pub min_programs_per_channel: usize,
    #[serde(default)]
    pub fallback_genre: FallbackPolicy,
    #[serde(default)]
    pub empty_channels: EmptyChannelPolicy,
    /// Fixed RNG seed; a fresh one is drawn and logged when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// What to ask the acquisition source for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub mode: AcquisitionMode,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
    #[serde(default = "default_include_links")]
    pub include_links: bool,
    /// Window start relative to now, in days (upcoming/past modes)
    #[serde(default)]
    pub days_from: Option<i64>,
    /// Window end relative to now, in days (upcoming/past modes)
    #[serde(default)]
    pub days_to: Option<i64>,
}

/// Where the instance and the debug dump are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_instance_file")]
    pub instance_file: String,
    #[serde(default = "default_debug_file")]
    pub debug_file: String,
}

fn default_opening_time() -> Minute {
    7 * 60
}

fn default_closing_time() -> Minute {
    23 * 60
}

fn default_min_duration() -> Minute {
    30
}

fn default_max_consecutive_genre() -> u32 {
    2
}

fn default_switch_penalty() -> i32 {
    3
}

fn default_termination_penalty() -> i32 {
    15
}

fn default_duration_cap() -> Minute {
    200
}

fn default_score_min() -> i32 {
    40
}

fn default_score_max() -> i32 {
    100
}

fn default_genre_retention() -> f64 {
    0.7
}

fn default_min_programs_per_channel() -> usize {
    5
}

fn default_query() -> String {
    "live".to_string()
}

fn default_max_results() -> u32 {
    50
}

fn default_max_channels() -> usize {
    40
}

fn default_include_links() -> bool {
    true
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("Output")
}

fn default_instance_file() -> String {
    "instance.json".to_string()
}

fn default_debug_file() -> String {
    "livestream_urls.csv".to_string()
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            opening_time: default_opening_time(),
            closing_time: default_closing_time(),
            min_duration: default_min_duration(),
            max_consecutive_genre: default_max_consecutive_genre(),
            switch_penalty: default_switch_penalty(),
            termination_penalty: default_termination_penalty(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            duration_cap: default_duration_cap(),
            score_min: default_score_min(),
            score_max: default_score_max(),
            genre_retention: default_genre_retention(),
            min_programs_per_channel: default_min_programs_per_channel(),
            fallback_genre: FallbackPolicy::default(),
            empty_channels: EmptyChannelPolicy::default(),
            seed: None,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            mode: AcquisitionMode::default(),
            query: default_query(),
            max_results: default_max_results(),
            max_channels: default_max_channels(),
            include_links: default_include_links(),
            days_from: None,
            days_to: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            instance_file: default_instance_file(),
            debug_file: default_debug_file(),
        }
    }
}

impl OutputSettings {
    pub fn instance_path(&self) -> PathBuf {
        self.directory.join(&self.instance_file)
    }

    pub fn debug_path(&self) -> PathBuf {
        self.directory.join(&self.debug_file)
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new("load_config")
                .with_entity("config")
                .with_entity_id(path.display())
        };

        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                context(),
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            GeneratorError::configuration_with_context(
                format!("Failed to parse config file: {}", e),
                context(),
            )
        })
    }

    /// Load configuration from the first standard location that exists.
    ///
    /// Searches for `instance-gen.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(config))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in any location
    /// * `Err` if a file exists but cannot be parsed
    pub fn from_default_location() -> GeneratorResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Apply `GENERATOR_*` environment overrides on top of file settings.
    ///
    /// # Environment Variables
    /// - `GENERATOR_MODE`: `live-now` | `upcoming` | `past`
    /// - `GENERATOR_MAX_CHANNELS`: channel-count cap
    /// - `GENERATOR_INCLUDE_LINKS`: `true` | `false`
    /// - `GENERATOR_SEED`: RNG seed (u64)
    /// - `GENERATOR_DAYS_FROM` / `GENERATOR_DAYS_TO`: day offsets for upcoming/past
    /// - `GENERATOR_OUTPUT_DIR`: output directory
    ///
    /// # Errors
    /// Returns a configuration error if a variable is set but malformed.
    pub fn apply_env_overrides(&mut self) -> GeneratorResult<()> {
        if let Some(mode) = env_var("GENERATOR_MODE") {
            self.source.mode = mode.parse().map_err(GeneratorError::configuration)?;
        }
        if let Some(max) = env_var("GENERATOR_MAX_CHANNELS") {
            self.source.max_channels = parse_env("GENERATOR_MAX_CHANNELS", &max)?;
        }
        if let Some(flag) = env_var("GENERATOR_INCLUDE_LINKS") {
            self.source.include_links = parse_env("GENERATOR_INCLUDE_LINKS", &flag)?;
        }
        if let Some(seed) = env_var("GENERATOR_SEED") {
            self.generation.seed = Some(parse_env("GENERATOR_SEED", &seed)?);
        }
        if let Some(days) = env_var("GENERATOR_DAYS_FROM") {
            self.source.days_from = Some(parse_env("GENERATOR_DAYS_FROM", &days)?);
        }
        if let Some(days) = env_var("GENERATOR_DAYS_TO") {
            self.source.days_to = Some(parse_env("GENERATOR_DAYS_TO", &days)?);
        }
        if let Some(dir) = env_var("GENERATOR_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> GeneratorResult<T> {
    value.trim().parse().map_err(|_| {
        GeneratorError::configuration(format!("{} has an invalid value '{}'", key, value))
    })
}

/// Credential for the candidate-acquisition service.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiCredentials {
    /// Read the API key from `YOUTUBE_API_KEY`.
    ///
    /// # Errors
    /// Returns a configuration error if the variable is unset or blank.
    pub fn from_env() -> GeneratorResult<Self> {
        let api_key = env_var(API_KEY_ENV).ok_or_else(|| {
            GeneratorError::configuration(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        Ok(Self { api_key })
    }
}
