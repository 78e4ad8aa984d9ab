//! Program length sampling.

use rand::Rng;

use crate::models::Minute;

/// Draw a duration in `[min, max]` with density rising linearly toward `max`.
///
/// Uses `min + (max - min) * sqrt(u)` for a uniform `u` in `[0, 1)`, truncated to
/// whole minutes. Returns `min` when the bounds are degenerate (`min >= max`).
pub fn sample_duration<R: Rng + ?Sized>(rng: &mut R, min: Minute, max: Minute) -> Minute {
    if min >= max {
        return min;
    }
    let u: f64 = rng.gen();
    let span = f64::from(max - min);
    min + (span * u.sqrt()) as Minute
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_degenerate_bounds_return_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_duration(&mut rng, 30, 30), 30);
        assert_eq!(sample_duration(&mut rng, 45, 10), 45);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1_000 {
            let d = sample_duration(&mut rng, 30, 200);
            assert!((30..=200).contains(&d), "duration {} out of bounds", d);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let seq_a: Vec<_> = (0..20).map(|_| sample_duration(&mut a, 30, 180)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| sample_duration(&mut b, 30, 180)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_distribution_leans_toward_max() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let n = 5_000;
        let upper_half = (0..n)
            .filter(|_| sample_duration(&mut rng, 0, 100) >= 50)
            .count();
        // P(sqrt(u) >= 0.5) = 0.75
        assert!(upper_half > n * 2 / 3, "upper half count {}", upper_half);
    }
}
