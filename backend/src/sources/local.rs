//! In-memory candidate source.
//!
//! Serves a fixed candidate pool without any network access, for tests and
//! offline runs. Can be switched to an unreachable state to exercise the
//! acquisition-failure path.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{CandidateQuery, CandidateSource};
use crate::error::{ErrorContext, GeneratorError, GeneratorResult};
use crate::models::Candidate;

/// Candidate source backed by a fixed pool.
///
/// # Example
/// ```
/// use instance_gen::models::Candidate;
/// use instance_gen::sources::StaticSource;
///
/// let source = StaticSource::new(vec![Candidate::new("abc", "Morning News", "News 24")]);
/// assert_eq!(source.len(), 1);
/// ```
#[derive(Clone)]
pub struct StaticSource {
    candidates: Vec<Candidate>,
    reachable: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl Default for StaticSource {
    /// Reachable source with an empty pool.
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StaticSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            reachable: Arc::new(AtomicBool::new(true)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source that fails every fetch.
    pub fn unreachable() -> Self {
        let source = Self::new(Vec::new());
        source.set_reachable(false);
        source
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[async_trait]
impl CandidateSource for StaticSource {
    async fn fetch_candidates(&self, query: &CandidateQuery) -> GeneratorResult<Vec<Candidate>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if !self.reachable.load(Ordering::SeqCst) {
            return Err(GeneratorError::acquisition_with_context(
                "Static source is unreachable",
                ErrorContext::new("fetch_candidates")
                    .with_entity("source")
                    .with_details(query.mode.as_str())
                    .retryable(),
            ));
        }

        Ok(self
            .candidates
            .iter()
            .take(query.max_results as usize)
            .cloned()
            .collect())
    }
}
