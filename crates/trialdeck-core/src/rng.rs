//! Seeded pseudo-random sequence and deterministic shuffle.
//!
//! A small linear congruential generator with the fixed parameters
//! 9301 / 49297 / 233280. The constants are the contract: every trial set
//! ever generated derives from this exact sequence, so reproducibility
//! wins over statistical quality here.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233280;

/// Deterministic pseudo-random sequence over [0, 1).
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Create a generator from an integer seed.
    pub fn new(seed: u64) -> Self {
        // Reduce up front; (a mod m * b + c) mod m == (a * b + c) mod m,
        // and the multiply then stays far below u64::MAX.
        Self {
            state: seed % MODULUS,
        }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Next integer in [0, bound).
    pub fn next_bounded(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize
    }
}

/// Shuffle a slice in place, seeded.
///
/// Fisher-Yates from the back: each position from the end swaps with a
/// generator-picked slot at or before it. The LCG's modest period is an
/// accepted trade-off; the permutation for a given seed never changes.
pub fn shuffle_in_place<T>(items: &mut [T], seed: u64) {
    let mut rng = Lcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_bounded(i + 1);
        items.swap(i, j);
    }
}

/// Return a shuffled copy of the input, leaving the original untouched.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, seed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_first_step_for_reference_seed() {
        // (12345 * 9301 + 49297) mod 233280 == 96382
        let mut rng = Lcg::new(12345);
        assert_eq!(rng.next_f64(), 96382.0 / 233280.0);
    }

    #[test]
    fn sequence_is_reproducible() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn large_seed_does_not_overflow() {
        let mut rng = Lcg::new(u64::MAX);
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn shuffle_same_seed_same_order() {
        let items: Vec<u32> = (0..50).collect();
        assert_eq!(shuffled(&items, 12345), shuffled(&items, 12345));
    }

    #[test]
    fn shuffle_different_seeds_differ() {
        let items: Vec<u32> = (0..50).collect();
        assert_ne!(shuffled(&items, 1), shuffled(&items, 2));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut out = shuffled(&items, 9);
        out.sort_unstable();
        assert_eq!(out, items);
    }

    #[test]
    fn shuffle_handles_trivial_lengths() {
        let empty: Vec<u32> = vec![];
        assert!(shuffled(&empty, 1).is_empty());
        assert_eq!(shuffled(&[7u32], 1), vec![7]);
    }

    #[test]
    fn shuffle_does_not_mutate_input() {
        let items: Vec<u32> = (0..10).collect();
        let _ = shuffled(&items, 3);
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }
}
