use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for rollouts and random players.
pub trait RandomGenerator: Default {
    /// Returns a uniformly distributed value in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

/// Thread-local generator seeded from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        rand::rng().random_range(from..to)
    }
}

/// Reproducible generator: the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}
