//! Fallback Cache Module
//!
//! In-process maps that keep every value seen by the cache layer. They are
//! the only source of truth while the remote store is unreachable.

use std::collections::BTreeMap;

use dashmap::DashMap;

use crate::cache::{CacheKey, Domain};

// == Memory Cache ==
/// One unbounded, non-expiring map per domain, keyed by index.
///
/// All operations are atomic per key; callers never lock.
#[derive(Debug)]
pub struct MemoryCache {
    slots: [DashMap<u64, String>; 4],
}

impl MemoryCache {
    /// Creates an empty fallback cache.
    pub fn new() -> Self {
        Self {
            slots: [
                DashMap::new(),
                DashMap::new(),
                DashMap::new(),
                DashMap::new(),
            ],
        }
    }

    fn slot(&self, domain: Domain) -> &DashMap<u64, String> {
        &self.slots[domain.slot()]
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if any.
    pub fn get(&self, key: CacheKey) -> Option<String> {
        self.slot(key.domain)
            .get(&key.index)
            .map(|entry| entry.value().clone())
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any earlier value.
    pub fn insert(&self, key: CacheKey, value: impl Into<String>) {
        self.slot(key.domain).insert(key.index, value.into());
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: CacheKey) -> bool {
        self.slot(key.domain).contains_key(&key.index)
    }

    /// Number of entries held for one domain.
    pub fn len_for(&self, domain: Domain) -> usize {
        self.slot(domain).len()
    }

    /// Entry counts keyed by domain, every domain present.
    pub fn entries_by_domain(&self) -> BTreeMap<Domain, usize> {
        Domain::ALL
            .iter()
            .map(|&domain| (domain, self.len_for(domain)))
            .collect()
    }

    /// Number of entries across all domains.
    pub fn len(&self) -> usize {
        self.slots.iter().map(DashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(DashMap::is_empty)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}
