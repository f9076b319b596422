//! Deterministic RNG utilities for reproducible tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate `n` deterministic `(sun, planet)` tooth-count pairs in
/// `[min, max]`.
///
/// Useful for sweeping the solver over many gear sizes.
pub fn tooth_count_pairs(n: usize, min: u32, max: u32, seed: u64) -> Vec<(u32, u32)> {
    let mut rng = seeded_rng(seed);
    (0..n)
        .map(|_| (rng.gen_range(min..=max), rng.gen_range(min..=max)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
