//! Uncached random generators.

use rand::{Rng, RngCore};

/// Upper bound (exclusive) for values produced by `random_sort`.
pub const SORT_VALUE_CEILING: u32 = 1_000_000;

/// `n` random bytes as lowercase hex.
pub fn random_bytes(n: usize) -> String {
    let mut bytes = vec![0u8; n];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `n` random integers in `[0, SORT_VALUE_CEILING)`, sorted ascending.
pub fn random_sort(n: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    let mut values: Vec<u32> = (0..n)
        .map(|_| rng.gen_range(0..SORT_VALUE_CEILING))
        .collect();
    values.sort_unstable();
    values
}
