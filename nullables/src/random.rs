//! Nullable random: scripted draws for the pairing engine.

use santa_pairing::RandomSource;
use std::sync::Mutex;

/// A deterministic random source for testing.
///
/// Replays the configured draws in order, cycling when it runs out. Each
/// draw is reduced modulo the requested bound.
pub struct NullRandom {
    draws: Vec<usize>,
    index: Mutex<usize>,
}

impl NullRandom {
    /// Create with a sequence of draws. An empty sequence always draws zero.
    pub fn new(draws: Vec<usize>) -> Self {
        Self {
            draws,
            index: Mutex::new(0),
        }
    }

    /// Create with a single draw returned for every call.
    pub fn constant(draw: usize) -> Self {
        Self::new(vec![draw])
    }

    /// How many draws have been taken so far.
    pub fn calls(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl RandomSource for NullRandom {
    fn next_index(&self, bound: usize) -> usize {
        let mut idx = self.index.lock().unwrap();
        let draw = if self.draws.is_empty() {
            0
        } else {
            self.draws[*idx % self.draws.len()]
        };
        *idx += 1;
        draw % bound
    }

    fn name(&self) -> &str {
        "null-random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_and_cycles() {
        let random = NullRandom::new(vec![1, 2, 3]);
        let draws: Vec<usize> = (0..5).map(|_| random.next_index(10)).collect();
        assert_eq!(draws, vec![1, 2, 3, 1, 2]);
        assert_eq!(random.calls(), 5);
    }

    #[test]
    fn draws_respect_bound() {
        let random = NullRandom::constant(7);
        assert_eq!(random.next_index(3), 1);
        assert_eq!(random.next_index(1), 0);
    }

    #[test]
    fn empty_script_draws_zero() {
        let random = NullRandom::new(Vec::new());
        assert_eq!(random.next_index(5), 0);
    }
}
