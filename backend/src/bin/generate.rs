//! Instance generator binary.
//!
//! Fetches broadcasts from YouTube, synthesizes a programming instance and
//! writes it next to a CSV debug dump.
//!
//! # Usage
//!
//! ```bash
//! YOUTUBE_API_KEY=... cargo run --bin instance-gen
//! YOUTUBE_API_KEY=... GENERATOR_MODE=upcoming GENERATOR_SEED=7 \
//!   cargo run --bin instance-gen -- path/to/instance-gen.toml
//! ```
//!
//! # Environment Variables
//!
//! - `YOUTUBE_API_KEY`: API key (required)
//! - `GENERATOR_MODE`: `live-now` (default), `upcoming` or `past`
//! - `GENERATOR_MAX_CHANNELS`, `GENERATOR_INCLUDE_LINKS`, `GENERATOR_SEED`,
//!   `GENERATOR_DAYS_FROM`, `GENERATOR_DAYS_TO`, `GENERATOR_OUTPUT_DIR`
//! - `RUST_LOG`: Log filter, a level or per-target directives such as
//!   `instance_gen=debug` (default: info)

use std::env;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use instance_gen::config::{ApiCredentials, GeneratorConfig};
use instance_gen::io::{instance_checksum, write_outputs};
use instance_gen::services::{generate, resolve_seed};
use instance_gen::sources::YouTubeSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .init();

    let mut config = match env::args().nth(1) {
        Some(path) => GeneratorConfig::from_file(&path)?,
        None => GeneratorConfig::from_default_location()?.unwrap_or_default(),
    };
    config.apply_env_overrides()?;

    // No key, no run: nothing is synthesized or written without it.
    let credentials = ApiCredentials::from_env()?;

    let seed = resolve_seed(&config);
    info!("Generating instance (mode={}, seed={})", config.source.mode, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let source = YouTubeSource::new(credentials)?;
    let instance = generate(&source, &config, &mut rng).await?;

    write_outputs(&instance, &config.output)?;

    info!(
        "Done: {} channels, checksum {}",
        instance.channels_count,
        instance_checksum(&instance)?
    );
    Ok(())
}

/// Filter from `RUST_LOG`; unset or unparsable values fall back to info.
fn log_filter(raw: Option<&str>) -> EnvFilter {
    raw.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
