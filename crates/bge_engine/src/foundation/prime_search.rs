//! Pseudo-random traversal of an index range
//!
//! [`PrimeSearch`] visits every index in `0..max_elements` exactly once in a
//! scrambled order without allocating a shuffled copy. It walks the residues
//! of a prime `p >= max_elements` with a fixed stride that is not a multiple of
//! `p`, skipping residues that fall outside the range.

use super::random::Random;

/// Stride-based index shuffler
#[derive(Debug, Clone)]
pub struct PrimeSearch {
    skip: u64,
    current_position: u64,
    max_elements: u64,
    prime: u64,
    searches: u64,
}

impl PrimeSearch {
    /// Create a search over `0..max_elements` using `random` to pick the stride
    pub fn new(max_elements: usize, random: &mut Random) -> Self {
        let max_elements = max_elements as u64;
        let a = u64::from(random.next_u32() % 13) + 1;
        let b = u64::from(random.next_u32() % 7) + 1;
        let c = u64::from(random.next_u32() % 5) + 1;

        let prime = next_prime(max_elements);
        let mut skip = a
            .wrapping_mul(max_elements)
            .wrapping_mul(max_elements)
            .wrapping_add(b.wrapping_mul(max_elements))
            .wrapping_add(c)
            % prime;
        // A stride that is a multiple of the prime would never leave the start
        if skip == 0 {
            skip = 1;
        }

        Self {
            skip,
            current_position: 0,
            max_elements,
            prime,
            searches: 0,
        }
    }

    /// Get the next index, optionally restarting the walk first
    ///
    /// Returns `None` once every index has been produced.
    pub fn next_index(&mut self, restart: bool) -> Option<usize> {
        if restart {
            self.restart();
        }
        if self.is_done() {
            return None;
        }

        let mut next = (self.current_position + self.skip) % self.prime;
        self.searches += 1;
        while next >= self.max_elements {
            next = (next + self.skip) % self.prime;
            self.searches += 1;
        }

        self.current_position = next;
        usize::try_from(next).ok()
    }

    /// Check if every index has been produced
    pub fn is_done(&self) -> bool {
        self.max_elements == 0 || self.searches >= self.prime
    }

    /// Start the walk over from the beginning
    pub fn restart(&mut self) {
        self.current_position = 0;
        self.searches = 0;
    }

    /// Size of the searched range
    pub fn len(&self) -> usize {
        usize::try_from(self.max_elements).unwrap_or(usize::MAX)
    }

    /// Check if the searched range is empty
    pub fn is_empty(&self) -> bool {
        self.max_elements == 0
    }
}

impl Iterator for PrimeSearch {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_index(false)
    }
}

fn is_prime(value: u64) -> bool {
    if value < 2 {
        return false;
    }
    if value % 2 == 0 {
        return value == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= value {
        if value % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime that is at least `value` (and at least 2)
fn next_prime(value: u64) -> u64 {
    let mut candidate = value.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}
