//! Deterministic holdout partitioning for retrain evaluation.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Splits `0..len` into (training, held-out) index sets.
///
/// Rows are shuffled with a `Pcg32` seeded from `seed`, then the first
/// `ceil(len * test_ratio)` shuffled rows become the held-out set. The same
/// `(len, test_ratio, seed)` always yields the same partition, which keeps
/// retrain evaluation reproducible across process restarts.
#[must_use]
#[expect(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn holdout_split(len: usize, test_ratio: f32, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = Pcg32::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    #[expect(clippy::cast_possible_truncation)]
    let test_len = ((len as f32) * test_ratio).ceil() as usize;
    let training = indices.split_off(test_len);
    (training, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_disjoint_and_complete() {
        let (training, held_out) = holdout_split(15, 0.2, 42);
        assert_eq!(held_out.len(), 3);
        assert_eq!(training.len(), 12);

        let mut all: Vec<usize> = training.iter().chain(&held_out).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_reproduces_the_partition() {
        assert_eq!(holdout_split(100, 0.2, 42), holdout_split(100, 0.2, 42));
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(holdout_split(100, 0.2, 1), holdout_split(100, 0.2, 2));
    }

    #[test]
    fn test_size_rounds_up() {
        let (training, held_out) = holdout_split(11, 0.2, 42);
        assert_eq!(held_out.len(), 3);
        assert_eq!(training.len(), 8);
    }
}
