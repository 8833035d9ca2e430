//! n-th prime via a Sieve of Eratosthenes.

use tracing::warn;

use super::{offload, ComputeEngine, MAX_PRIME_INDEX, SENTINEL};
use crate::cache::CacheKey;

/// Sieve bound for the n-th prime: 20 candidates per requested prime, with
/// a floor of 100 requested primes.
pub fn sieve_limit(n: u64) -> usize {
    (n.max(100) * 20) as usize
}

/// All primes `<= limit`, ascending.
pub fn sieve_primes(limit: usize) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();
    for i in 2..=limit {
        if composite[i] {
            continue;
        }
        primes.push(i as u64);
        let mut multiple = i.saturating_mul(i);
        while multiple <= limit {
            composite[multiple] = true;
            multiple += i;
        }
    }
    primes
}

impl ComputeEngine {
    /// The n-th prime (1-based) as decimal text.
    ///
    /// Returns `"0"` and logs a warning when `n` is outside the supported
    /// range or the sieve comes up short.
    pub async fn nth_prime(&self, n: i64) -> String {
        if n < 1 || n as u64 > MAX_PRIME_INDEX {
            warn!(n, max = MAX_PRIME_INDEX, "Prime index out of range");
            return SENTINEL.to_string();
        }

        let n = n as u64;
        let key = CacheKey::prime(n);
        if let Some(hit) = self.cache().get(key).await {
            return hit;
        }

        let limit = sieve_limit(n);
        let Some(primes) = offload(move || sieve_primes(limit)).await else {
            return SENTINEL.to_string();
        };
        match primes.get((n - 1) as usize) {
            Some(prime) => {
                let value = prime.to_string();
                self.cache().set(key, &value).await;
                value
            }
            None => {
                warn!(n, limit, found = primes.len(), "Prime sieve exhausted");
                SENTINEL.to_string()
            }
        }
    }
}
