//! Seeded random source.
//!
//! Uses ChaCha8 so that identical seeds give identical initial
//! conditions on every platform.

use grayscott_core::RandomSource;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A [`RandomSource`] backed by a seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    /// Create a source from a 64-bit seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
