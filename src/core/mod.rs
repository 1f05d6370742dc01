//! Engine-Independent Primitives
//!
//! - `rng`: the randomness seam used for player placement

pub mod rng;

pub use rng::{DeterministicRng, RandomSource, SystemRandom};
