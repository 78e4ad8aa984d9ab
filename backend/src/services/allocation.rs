//! Candidate-to-channel allocation strategies.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::models::Candidate;
use crate::sources::AcquisitionMode;

/// How the candidate pool is spread over channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStrategy {
    /// Shuffle and deal the pool round-robin, then top every channel up with
    /// random pool items it does not hold yet. Channels are filled by the
    /// schedule builder.
    RoundRobin { min_per_channel: usize },
    /// One candidate per channel; the channel carries that single event at its
    /// own timestamps.
    OnePerChannel,
}

impl AllocationStrategy {
    /// Live pools feed full-day lineups; upcoming and past pools describe single events.
    pub fn for_mode(mode: AcquisitionMode, min_per_channel: usize) -> Self {
        match mode {
            AcquisitionMode::LiveNow => Self::RoundRobin { min_per_channel },
            AcquisitionMode::Upcoming | AcquisitionMode::Past => Self::OnePerChannel,
        }
    }

    /// Split `candidates` into at most `channel_count` slots.
    pub fn allocate<'a, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        candidates: &'a [Candidate],
        channel_count: usize,
    ) -> Vec<Vec<&'a Candidate>> {
        match *self {
            Self::RoundRobin { min_per_channel } => {
                round_robin(rng, candidates, channel_count, min_per_channel)
            }
            Self::OnePerChannel => one_per_channel(candidates, channel_count),
        }
    }
}

fn round_robin<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'a [Candidate],
    channel_count: usize,
    min_per_channel: usize,
) -> Vec<Vec<&'a Candidate>> {
    let mut slots: Vec<Vec<&Candidate>> = vec![Vec::new(); channel_count];
    if channel_count == 0 || candidates.is_empty() {
        return slots;
    }

    let mut pool: Vec<&Candidate> = candidates.iter().collect();
    pool.shuffle(rng);

    for (i, candidate) in pool.iter().copied().enumerate() {
        slots[i % channel_count].push(candidate);
    }

    // A slot can never hold more distinct items than the pool offers.
    let distinct = pool
        .iter()
        .map(|c| c.id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let target = min_per_channel.min(distinct);

    for slot in &mut slots {
        while slot.len() < target {
            let extra = pool[rng.gen_range(0..pool.len())];
            if !slot.iter().any(|c| c.id == extra.id) {
                slot.push(extra);
            }
        }
    }
    slots
}

fn one_per_channel(candidates: &[Candidate], channel_count: usize) -> Vec<Vec<&Candidate>> {
    candidates
        .iter()
        .take(channel_count)
        .map(|c| vec![c])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("v{}", i), format!("Stream {}", i), "Chan"))
            .collect()
    }

    #[test]
    fn test_round_robin_spreads_evenly() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let candidates = pool(20);
        let slots = AllocationStrategy::RoundRobin { min_per_channel: 0 }.allocate(
            &mut rng,
            &candidates,
            4,
        );
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn test_round_robin_tops_up_without_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let candidates = pool(6);
        let slots = AllocationStrategy::RoundRobin { min_per_channel: 5 }.allocate(
            &mut rng,
            &candidates,
            4,
        );
        for slot in &slots {
            assert_eq!(slot.len(), 5);
            let ids: HashSet<_> = slot.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), 5);
        }
    }

    #[test]
    fn test_top_up_is_capped_by_distinct_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let candidates = pool(2);
        let slots = AllocationStrategy::RoundRobin { min_per_channel: 5 }.allocate(
            &mut rng,
            &candidates,
            3,
        );
        assert!(slots.iter().all(|s| s.len() == 2));
    }

    #[test]
    fn test_empty_pool_gives_empty_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let slots = AllocationStrategy::RoundRobin { min_per_channel: 5 }.allocate(
            &mut rng,
            &[],
            3,
        );
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_one_per_channel_respects_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let candidates = pool(5);
        let slots = AllocationStrategy::OnePerChannel.allocate(&mut rng, &candidates, 3);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.len() == 1));
        assert_eq!(slots[0][0].id, "v0");
    }

    #[test]
    fn test_strategy_for_mode() {
        assert_eq!(
            AllocationStrategy::for_mode(AcquisitionMode::LiveNow, 5),
            AllocationStrategy::RoundRobin { min_per_channel: 5 }
        );
        assert_eq!(
            AllocationStrategy::for_mode(AcquisitionMode::Past, 5),
            AllocationStrategy::OnePerChannel
        );
    }
}
