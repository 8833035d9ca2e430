//! Factorials that resume from the nearest cached prefix.

use num_bigint::BigUint;
use tracing::{debug, warn};

use super::{offload, ComputeEngine, SENTINEL};
use crate::cache::CacheKey;

/// Intermediate products are cached at every multiple of this index.
pub const FACTORIAL_CHECKPOINT_EVERY: u64 = 5;

/// Multiplies `start..=n` into `product`, collecting checkpoint values.
fn factorial_run(start: u64, mut product: BigUint, n: u64) -> (String, Vec<(u64, String)>) {
    let mut checkpoints = Vec::new();
    for i in start..=n {
        product *= i;
        if i % FACTORIAL_CHECKPOINT_EVERY == 0 && i != n {
            checkpoints.push((i, product.to_string()));
        }
    }
    (product.to_string(), checkpoints)
}

impl ComputeEngine {
    /// n! as decimal text; anything `<= 1` yields `"1"`.
    pub async fn factorial(&self, n: i64) -> String {
        if n <= 1 {
            return "1".to_string();
        }

        let n = n as u64;
        let key = CacheKey::factorial(n);
        if let Some(hit) = self.cache().get(key).await {
            return hit;
        }

        let (start, product) = self.nearest_cached_factorial(n).await;
        let Some((value, checkpoints)) = offload(move || factorial_run(start, product, n)).await
        else {
            return SENTINEL.to_string();
        };
        for (index, checkpoint) in &checkpoints {
            self.cache().set(CacheKey::factorial(*index), checkpoint).await;
        }

        self.cache().set(key, &value).await;
        value
    }

    /// Walks down from `n - 1` looking for a cached i!. Returns the first
    /// index still to multiply in and the running product.
    async fn nearest_cached_factorial(&self, n: u64) -> (u64, BigUint) {
        for i in (2..n).rev() {
            let Some(cached) = self.cache().peek(CacheKey::factorial(i)).await else {
                continue;
            };
            match cached.parse::<BigUint>() {
                Ok(product) => {
                    debug!(n, resume_from = i, "Resuming factorial from cached prefix");
                    return (i + 1, product);
                }
                Err(e) => {
                    warn!(index = i, error = %e, "Ignoring unparsable cached factorial");
                }
            }
        }
        (2, BigUint::from(1u32))
    }
}
