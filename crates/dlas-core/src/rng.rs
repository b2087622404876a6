//! Deterministic draw stream backing the "flavor" values.
//!
//! Both pipelines consume a seeded ChaCha20 generator through this wrapper.
//! Draw order is part of the output contract: every `randint` / `uniform`
//! call advances the generator state, so reordering call sites changes all
//! downstream values for the same payload.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::digest::SEED_OFFSET;

/// Seeded generator exposing the two draw shapes the pipelines use.
pub struct DrawStream {
    rng: ChaCha20Rng,
}

impl DrawStream {
    /// Build a stream from a payload-derived seed. The decorrelation
    /// offset is applied here so call sites only handle raw seeds.
    pub fn from_seed(seed: u32) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(u64::from(seed) + SEED_OFFSET),
        }
    }

    /// Integer draw over the inclusive range `[low, high]`.
    pub fn randint(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform float draw over `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DrawStream::from_seed(0x5eed_1234);
        let mut b = DrawStream::from_seed(0x5eed_1234);

        for _ in 0..16 {
            assert_eq!(a.randint(0, 1000), b.randint(0, 1000));
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DrawStream::from_seed(1);
        let mut b = DrawStream::from_seed(2);

        let draws_a: Vec<i64> = (0..8).map(|_| a.randint(0, i64::MAX / 2)).collect();
        let draws_b: Vec<i64> = (0..8).map(|_| b.randint(0, i64::MAX / 2)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_randint_bounds_inclusive() {
        let mut stream = DrawStream::from_seed(7);
        let mut seen_low = false;
        let mut seen_high = false;

        for _ in 0..2000 {
            let draw = stream.randint(3, 5);
            assert!((3..=5).contains(&draw));
            seen_low |= draw == 3;
            seen_high |= draw == 5;
        }
        assert!(seen_low && seen_high, "both range ends should be reachable");
    }

    #[test]
    fn test_uniform_bounds() {
        let mut stream = DrawStream::from_seed(11);
        for _ in 0..2000 {
            let draw = stream.uniform(0.35, 0.9);
            assert!((0.35..0.9).contains(&draw));
        }
    }
}
