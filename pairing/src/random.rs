//! Randomness sources for the pairing engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Trait for providing the random draws pairing consumes.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..bound`. `bound` is never zero.
    fn next_index(&self, bound: usize) -> usize;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

/// Draws from the thread-local RNG. Output differs on every run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }

    fn name(&self) -> &str {
        "thread-rng"
    }
}

/// A reproducible source: the same seed yields the same sequence of draws.
#[derive(Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, bound: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }

    fn name(&self) -> &str {
        "seeded-rng"
    }
}

/// Fisher–Yates shuffle driven by `random`.
pub(crate) fn shuffle<T>(random: &dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random.next_index(i + 1);
        items.swap(i, j);
    }
}
