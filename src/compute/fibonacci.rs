//! Fibonacci numbers with periodic checkpoints.

use num_bigint::BigUint;

use super::{offload, ComputeEngine, SENTINEL};
use crate::cache::CacheKey;

/// Intermediate values are cached at every multiple of this index.
pub const FIBONACCI_CHECKPOINT_EVERY: u64 = 10;

/// F(n) for `n >= 2`, with the checkpoint values passed on the way.
fn fibonacci_run(n: u64) -> (String, Vec<(u64, String)>) {
    let mut checkpoints = Vec::new();

    // b holds F(i) at the end of each step
    let mut a = BigUint::from(0u32);
    let mut b = BigUint::from(1u32);
    for i in 2..=n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);

        if i % FIBONACCI_CHECKPOINT_EVERY == 0 && i != n {
            checkpoints.push((i, b.to_string()));
        }
    }

    (b.to_string(), checkpoints)
}

impl ComputeEngine {
    /// F(n) as decimal text, with F(0) = 0 and F(1) = 1.
    ///
    /// A miss recomputes from the start of the sequence. The checkpoints it
    /// leaves behind only serve later requests for those exact indices.
    pub async fn fibonacci(&self, n: i64) -> String {
        if n <= 0 {
            return "0".to_string();
        }
        if n == 1 {
            return "1".to_string();
        }

        let n = n as u64;
        let key = CacheKey::fibonacci(n);
        if let Some(hit) = self.cache().get(key).await {
            return hit;
        }

        let Some((value, checkpoints)) = offload(move || fibonacci_run(n)).await else {
            return SENTINEL.to_string();
        };
        for (index, checkpoint) in &checkpoints {
            self.cache().set(CacheKey::fibonacci(*index), checkpoint).await;
        }

        self.cache().set(key, &value).await;
        value
    }
}
