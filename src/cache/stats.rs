//! Cache Statistics Module
//!
//! Tracks cache performance metrics: remote hits, fallback hits, misses,
//! writes and swallowed remote errors. Peeks (lookups made while searching
//! for a resume point) are counted on their own and stay out of the hit rate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::cache::Domain;

// == Cache Counters ==
/// Lock-free counters updated on the request path.
#[derive(Debug, Default)]
pub struct CacheCounters {
    remote_hits: AtomicU64,
    fallback_hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    remote_errors: AtomicU64,
    peeks: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_remote_hit(&self) {
        self.remote_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_remote_error(&self) {
        self.remote_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_peek(&self) {
        self.peeks.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self, fallback_entries: usize) -> CacheStats {
        CacheStats {
            remote_hits: self.remote_hits.load(Ordering::Relaxed),
            fallback_hits: self.fallback_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            remote_errors: self.remote_errors.load(Ordering::Relaxed),
            peeks: self.peeks.load(Ordering::Relaxed),
            fallback_entries,
            fallback_by_domain: BTreeMap::new(),
        }
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads answered by the remote store
    pub remote_hits: u64,
    /// Reads answered by the in-process fallback
    pub fallback_hits: u64,
    /// Reads answered by neither
    pub misses: u64,
    /// Calls to `set`
    pub writes: u64,
    /// Remote operations that failed and were swallowed
    pub remote_errors: u64,
    /// Lookups made while searching for a resume point
    pub peeks: u64,
    /// Entries held in the fallback maps
    pub fallback_entries: usize,
    /// Fallback entries per domain
    pub fallback_by_domain: BTreeMap<Domain, usize>,
}

impl CacheStats {
    /// Total hits from either tier.
    pub fn hits(&self) -> u64 {
        self.remote_hits + self.fallback_hits
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = CacheCounters::new().snapshot(0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_counts_both_tiers() {
        let counters = CacheCounters::new();
        counters.record_remote_hit();
        counters.record_fallback_hit();
        counters.record_miss();
        counters.record_miss();

        let stats = counters.snapshot(3);
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.fallback_entries, 3);
    }

    #[test]
    fn test_record_writes_and_errors() {
        let counters = CacheCounters::new();
        counters.record_write();
        counters.record_write();
        counters.record_remote_error();

        let stats = counters.snapshot(0);
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.remote_errors, 1);
    }

    #[test]
    fn test_peeks_stay_out_of_hit_rate() {
        let counters = CacheCounters::new();
        counters.record_fallback_hit();
        for _ in 0..50 {
            counters.record_peek();
        }

        let stats = counters.snapshot(0);
        assert_eq!(stats.peeks, 50);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_rate(), 1.0);
    }
}
