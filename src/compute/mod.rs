//! Computation Module
//!
//! Memoized numeric functions backed by a `ValueCache`, plus the stateless
//! random generators.
//!
//! Every cached function follows the same path: cache hit returns
//! immediately; a miss computes on the blocking pool, writes checkpoints
//! where the recurrence allows it, then caches and returns the final value.

mod factorial;
mod fibonacci;
mod pi;
mod prime;
mod random;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tracing::warn;

use crate::cache::{MemoryCache, ValueCache};

pub use factorial::FACTORIAL_CHECKPOINT_EVERY;
pub use fibonacci::FIBONACCI_CHECKPOINT_EVERY;
pub use pi::{machin_pi, pi_terms};
pub use prime::{sieve_limit, sieve_primes};
pub use random::{random_bytes, random_sort};

// == Public Constants ==
/// Largest accepted Fibonacci index
pub const MAX_FIBONACCI: u64 = 1000;

/// Largest accepted prime index (1-based)
pub const MAX_PRIME_INDEX: u64 = 10_000;

/// Largest accepted factorial argument
pub const MAX_FACTORIAL: u64 = 170;

/// Largest accepted number of Pi digits
pub const MAX_PI_DIGITS: u64 = 50;

/// Largest accepted random byte count
pub const MAX_RANDOM_BYTES: u64 = 1024;

/// Largest accepted random-sort length
pub const MAX_SORT_SIZE: u64 = 10_000;

/// Value returned when a computation cannot produce a result.
pub const SENTINEL: &str = "0";

// == Compute Engine ==
/// Memoized numeric functions over an injected cache.
#[derive(Clone)]
pub struct ComputeEngine {
    cache: Arc<dyn ValueCache>,
}

impl std::fmt::Debug for ComputeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputeEngine").finish_non_exhaustive()
    }
}

impl ComputeEngine {
    pub fn new(cache: Arc<dyn ValueCache>) -> Self {
        Self { cache }
    }

    /// Engine over a private in-process cache.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCache::new()))
    }

    pub(crate) fn cache(&self) -> &dyn ValueCache {
        self.cache.as_ref()
    }
}

/// Runs CPU-bound work on the blocking pool. A panic in `work` is resumed
/// on the caller; `None` means the runtime shut down first.
async fn offload<F, T>(work: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(value) => Some(value),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!(error = %e, "Blocking computation cancelled");
            None
        }
    }
}
