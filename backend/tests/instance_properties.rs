//! Property tests over randomly configured instances.

mod support;

use instance_gen::config::GeneratorConfig;
use instance_gen::models::{DayWindow, Genre};
use instance_gen::services::{sample_duration, segment_day, AllocationStrategy, InstanceAssembler};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use support::live_pool;

fn assembler(opening: i32, span: i32, min_duration: i32, cap_extra: i32) -> InstanceAssembler {
    let mut config = GeneratorConfig::default();
    config.instance.opening_time = opening;
    config.instance.closing_time = opening + span;
    config.instance.min_duration = min_duration;
    config.generation.duration_cap = min_duration + cap_extra;
    InstanceAssembler::from_config(&config)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lineups_are_contiguous_and_cover_the_day(
        seed in any::<u64>(),
        opening in 0i32..600,
        span in 60i32..900,
        min_duration in 5i32..60,
        cap_extra in 0i32..200,
        pool_size in 0usize..25,
        channels in 1usize..8,
    ) {
        let assembler = assembler(opening, span, min_duration, cap_extra);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let instance = assembler
            .assemble(
                &mut rng,
                &live_pool(pool_size),
                channels,
                AllocationStrategy::RoundRobin { min_per_channel: 5 },
            )
            .unwrap();

        prop_assert!(instance.validate().is_ok());
        prop_assert!(instance.validate_coverage().is_ok());

        for channel in &instance.channels {
            let programs = &channel.programs;
            prop_assert_eq!(programs[0].start, opening);
            prop_assert!(opening + span - programs[programs.len() - 1].end < min_duration);
            for pair in programs.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for p in programs {
                prop_assert!(p.duration() >= min_duration);
                prop_assert!((40..=100).contains(&p.score));
                prop_assert!(Genre::ALL.contains(&p.genre));
            }
        }
    }

    #[test]
    fn preferences_tile_any_day(seed in any::<u64>(), opening in 0i32..1400, span in 1i32..1440) {
        let day = DayWindow::new(opening, opening + span);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let prefs = segment_day(&mut rng, day);

        prop_assert_eq!(prefs.len(), 6);
        prop_assert_eq!(prefs[0].start, day.opening);
        prop_assert_eq!(prefs[5].end, day.closing);
        for pair in prefs.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn durations_stay_in_bounds(seed in any::<u64>(), min in 1i32..300, extra in 0i32..300) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let d = sample_duration(&mut rng, min, min + extra);
        prop_assert!(d >= min && d <= min + extra);
    }
}
