// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Generates values from proptest strategies, deterministically from a string seed.
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose output depends only on `seed`.
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Self {
        // ChaCha wants a 32-byte seed: hash the input four times with different hasher seeds.
        let mut rng_seed = [0u8; 32];
        for (ix, chunk) in rng_seed.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(ix as u64);
            hasher.write(seed.as_ref());
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &rng_seed);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Returns a generator with a fresh RNG derived from this one.
    ///
    /// Values drawn from the clone don't affect the sequence this generator produces next.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    /// Draws a single value from `strategy`.
    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("fixture strategies never reject values")
            .current()
    }
}
