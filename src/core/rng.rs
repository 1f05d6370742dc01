//! Randomness Seam
//!
//! The engine only ever needs "an index below N": a random starting cell for
//! placement and a random member of the empty-cell set for mid-round joins.
//! That single operation sits behind a trait so tests can script placement
//! with a deterministic generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of placement randomness.
///
/// Implementations must be `Send` because the engine lock may be taken from
/// any worker task.
pub trait RandomSource: Send {
    /// Return a uniformly distributed value in `[0, max)`.
    ///
    /// `max == 0` returns 0.
    fn next_below(&mut self, max: usize) -> usize;
}

/// Production randomness backed by the `rand` crate.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Create a new source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }
}

/// Deterministic PRNG using the Xorshift128+ algorithm.
///
/// Given the same seed, produces the identical sequence on every platform.
/// Used by tests to make placement and join order reproducible.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // State must never be all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }
}

impl RandomSource for DeterministicRng {
    fn next_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_rng_repeats() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_deterministic_rng_differs_by_seed() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(54321);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_below_range() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_below(100) < 100);
        }

        assert_eq!(rng.next_below(0), 0);
        assert_eq!(rng.next_below(1), 0);
    }

    #[test]
    fn test_system_random_range() {
        let mut rng = SystemRandom::new();

        for _ in 0..100 {
            assert!(rng.next_below(7) < 7);
        }
        assert_eq!(rng.next_below(0), 0);
    }
}
