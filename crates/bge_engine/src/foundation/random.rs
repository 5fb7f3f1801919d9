//! Seeded random number generation
//!
//! Wraps a ChaCha8 generator so a game session can be replayed from its seed.

use rand::distributions::uniform::SampleUniform;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Random generation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomError {
    /// Range minimum is greater than its maximum
    #[error("Invalid random range: min {min} > max {max}")]
    InvalidRange {
        /// Formatted minimum
        min: String,
        /// Formatted maximum
        max: String,
    },
}

/// Inclusive range of values to draw from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRange<T> {
    /// Smallest value that can be generated
    pub min: T,
    /// Largest value that can be generated
    pub max: T,
}

impl<T: PartialOrd> RandomRange<T> {
    /// Create a new range
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// A range is valid when its minimum does not exceed its maximum
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Deterministic random number generator
#[derive(Debug, Clone)]
pub struct Random {
    seed: u64,
    engine: ChaCha8Rng,
}

impl Random {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            engine: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the current system time
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// Generate a value within the inclusive range
    pub fn generate<T>(&mut self, range: RandomRange<T>) -> Result<T, RandomError>
    where
        T: SampleUniform + PartialOrd + Debug,
    {
        if !range.is_valid() {
            return Err(RandomError::InvalidRange {
                min: format!("{:?}", range.min),
                max: format!("{:?}", range.max),
            });
        }
        Ok(self.engine.gen_range(range.min..=range.max))
    }

    /// Generate a raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        self.engine.next_u32()
    }

    /// Restart the sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.engine = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Seed the generator was last seeded with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_time()
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Random::new(42);
        let mut b = Random::new(42);

        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut random = Random::new(7);
        let first: Vec<u32> = (0..4).map(|_| random.next_u32()).collect();

        random.reseed(7);
        let second: Vec<u32> = (0..4).map(|_| random.next_u32()).collect();

        assert_eq!(first, second);
        assert_eq!(random.seed(), 7);
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut random = Random::new(1);
        for _ in 0..100 {
            let value = random.generate(RandomRange::new(-2.5f32, 2.5)).unwrap();
            assert!((-2.5..=2.5).contains(&value));

            let value = random.generate(RandomRange::new(3u32, 5)).unwrap();
            assert!((3..=5).contains(&value));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut random = Random::new(1);
        assert_eq!(random.generate(RandomRange::new(4i32, 4)).unwrap(), 4);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut random = Random::new(1);
        let range = RandomRange::new(10.0f64, 1.0);

        assert!(!range.is_valid());
        assert!(matches!(random.generate(range), Err(RandomError::InvalidRange { .. })));
    }
}
