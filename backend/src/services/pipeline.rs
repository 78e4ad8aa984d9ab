//! Generation pipeline: acquire, allocate, assemble, validate.

use chrono::Utc;
use rand::Rng;

use super::allocation::AllocationStrategy;
use super::assembler::InstanceAssembler;
use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::models::Instance;
use crate::sources::{CandidateQuery, CandidateSource};

/// Run one generation against `source`.
///
/// The source is awaited once. The allocation strategy follows the acquisition
/// mode: live pools become full-day lineups, upcoming and past pools become
/// one event per channel. The returned instance has passed validation.
///
/// # Errors
/// Acquisition errors propagate unchanged; degenerate settings surface as
/// configuration errors; an instance breaking its invariants surfaces as a
/// validation error. An empty pool is not an error.
pub async fn generate<R: Rng + ?Sized>(
    source: &dyn CandidateSource,
    config: &GeneratorConfig,
    rng: &mut R,
) -> GeneratorResult<Instance> {
    let assembler = InstanceAssembler::from_config(config);
    // Fail on bad bounds before spending an API call.
    assembler.check_settings()?;

    let query = CandidateQuery::from_settings(&config.source, Utc::now());
    log::info!(
        "Acquiring candidates (mode={}, query='{}', max_results={})",
        query.mode,
        query.query,
        query.max_results
    );
    let candidates = source.fetch_candidates(&query).await?;
    if candidates.is_empty() {
        log::warn!("Candidate pool is empty; the instance will have no channels");
    } else {
        log::info!("Fetched {} candidates", candidates.len());
    }

    let strategy = AllocationStrategy::for_mode(
        config.source.mode,
        config.generation.min_programs_per_channel,
    );
    let instance = assembler.assemble(rng, &candidates, config.source.max_channels, strategy)?;

    instance.validate()?;
    if let AllocationStrategy::RoundRobin { .. } = strategy {
        instance.validate_coverage()?;
    }

    log::info!(
        "Generated instance: {} channels, {} programs, {} priority blocks",
        instance.channels_count,
        instance.program_count(),
        instance.priority_blocks.len()
    );
    Ok(instance)
}

/// Seed for this run: the configured one, or a fresh one drawn from the OS.
pub fn resolve_seed(config: &GeneratorConfig) -> u64 {
    config
        .generation
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen())
}
