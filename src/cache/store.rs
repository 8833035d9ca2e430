//! Cache Store Module
//!
//! Remote-first cache with an in-process fallback. Remote failures are
//! logged, counted and absorbed; callers only ever see a hit or a miss.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::link::{ConnectionState, RemoteLink};
use crate::cache::remote::RemoteStore;
use crate::cache::stats::{CacheCounters, CacheStats};
use crate::cache::{CacheKey, MemoryCache};
use crate::config::DEFAULT_TTL_SECS;
use crate::error::CacheError;

// == Write Outcome ==
/// Where a `set` ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Written to the remote store and the fallback
    Remote,
    /// Remote absent or failed; written to the fallback only
    FallbackOnly,
}

// == Value Cache ==
/// Cache seam used by the computation engine.
#[async_trait]
pub trait ValueCache: Send + Sync {
    async fn get(&self, key: CacheKey) -> Option<String>;

    /// Lookup that is not a request for `key` itself, such as a search for
    /// a resume point. Stores that keep statistics count it apart from
    /// hits and misses.
    async fn peek(&self, key: CacheKey) -> Option<String> {
        self.get(key).await
    }

    async fn set(&self, key: CacheKey, value: &str) -> WriteOutcome;
}

/// Tier that answered a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Remote,
    Fallback,
}

#[async_trait]
impl ValueCache for MemoryCache {
    async fn get(&self, key: CacheKey) -> Option<String> {
        MemoryCache::get(self, key)
    }

    async fn set(&self, key: CacheKey, value: &str) -> WriteOutcome {
        self.insert(key, value);
        WriteOutcome::FallbackOnly
    }
}

// == Cache Store ==
/// Remote store (when connected) layered over the per-domain fallback maps.
#[derive(Debug)]
pub struct CacheStore {
    /// Remote link, `None` when the remote cache is disabled
    link: Option<Arc<RemoteLink>>,
    /// Process-lifetime fallback maps
    fallback: MemoryCache,
    /// Performance counters
    counters: CacheCounters,
    /// TTL applied to remote writes
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store over an optional remote link.
    ///
    /// # Arguments
    /// * `link` - Remote link, or `None` for fallback-only operation
    /// * `ttl` - TTL applied to every remote write
    pub fn new(link: Option<Arc<RemoteLink>>, ttl: Duration) -> Self {
        Self {
            link,
            fallback: MemoryCache::new(),
            counters: CacheCounters::new(),
            ttl,
        }
    }

    /// Fallback-only store with the default TTL.
    pub fn in_memory() -> Self {
        Self::new(None, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    pub fn link(&self) -> Option<&Arc<RemoteLink>> {
        self.link.as_ref()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.link
            .as_ref()
            .map_or(ConnectionState::Disconnected, |link| link.state())
    }

    pub fn fallback(&self) -> &MemoryCache {
        &self.fallback
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.counters.snapshot(self.fallback.len());
        stats.fallback_by_domain = self.fallback.entries_by_domain();
        stats
    }

    fn remote(&self) -> Option<Arc<dyn RemoteStore>> {
        self.link.as_ref().and_then(|link| link.store())
    }

    fn remote_failed(&self, op: &'static str, key: CacheKey, error: CacheError) {
        warn!(op, key = %key, error = %error, "Remote cache operation failed, using fallback");
        self.counters.record_remote_error();
        if let Some(link) = &self.link {
            link.mark_failed(&error);
        }
    }

    /// Remote read when connected, then the fallback map. A remote hit is
    /// copied into the fallback.
    async fn lookup(&self, key: CacheKey) -> Option<(String, Tier)> {
        if let Some(remote) = self.remote() {
            match remote.get(&key.to_key_string()).await {
                Ok(Some(value)) => {
                    self.fallback.insert(key, value.clone());
                    return Some((value, Tier::Remote));
                }
                Ok(None) => {}
                Err(e) => self.remote_failed("GET", key, e),
            }
        }

        self.fallback.get(key).map(|value| (value, Tier::Fallback))
    }

    // == Get ==
    /// Reads `key`, counting the result as a hit or a miss.
    pub async fn get(&self, key: CacheKey) -> Option<String> {
        match self.lookup(key).await {
            Some((value, Tier::Remote)) => {
                debug!(key = %key, "Cache HIT (remote)");
                self.counters.record_remote_hit();
                Some(value)
            }
            Some((value, Tier::Fallback)) => {
                debug!(key = %key, "Cache HIT (fallback)");
                self.counters.record_fallback_hit();
                Some(value)
            }
            None => {
                debug!(key = %key, "Cache MISS");
                self.counters.record_miss();
                None
            }
        }
    }

    /// Reads `key` without touching the hit and miss counters.
    pub async fn peek(&self, key: CacheKey) -> Option<String> {
        self.counters.record_peek();
        self.lookup(key).await.map(|(value, _)| value)
    }

    // == Set ==
    /// Remote write with the configured TTL when connected; the fallback
    /// map is written regardless of the remote outcome.
    pub async fn set(&self, key: CacheKey, value: &str) -> WriteOutcome {
        self.counters.record_write();

        let mut outcome = WriteOutcome::FallbackOnly;
        if let Some(remote) = self.remote() {
            match remote.set(&key.to_key_string(), value, self.ttl).await {
                Ok(()) => {
                    debug!(key = %key, ttl_seconds = self.ttl.as_secs(), "Cache SET");
                    outcome = WriteOutcome::Remote;
                }
                Err(e) => self.remote_failed("SETEX", key, e),
            }
        }

        self.fallback.insert(key, value);
        outcome
    }
}

#[async_trait]
impl ValueCache for CacheStore {
    async fn get(&self, key: CacheKey) -> Option<String> {
        CacheStore::get(self, key).await
    }

    async fn peek(&self, key: CacheKey) -> Option<String> {
        CacheStore::peek(self, key).await
    }

    async fn set(&self, key: CacheKey, value: &str) -> WriteOutcome {
        CacheStore::set(self, key, value).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::link::RetryPolicy;
    use crate::cache::test_support::MockConnector;
    use crate::cache::Domain;
    use std::sync::atomic::Ordering;

    async fn connected_store() -> (CacheStore, Arc<MockConnector>) {
        let connector = Arc::new(MockConnector::new());
        let link = Arc::new(RemoteLink::new(connector.clone(), RetryPolicy::default()));
        link.connect().await.unwrap();
        (
            CacheStore::new(Some(link), Duration::from_secs(DEFAULT_TTL_SECS)),
            connector,
        )
    }

    #[tokio::test]
    async fn test_in_memory_set_and_get() {
        let store = CacheStore::in_memory();

        let outcome = store.set(CacheKey::fibonacci(10), "55").await;
        assert_eq!(outcome, WriteOutcome::FallbackOnly);
        assert_eq!(store.get(CacheKey::fibonacci(10)).await.as_deref(), Some("55"));
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_get_miss() {
        let store = CacheStore::in_memory();
        assert!(store.get(CacheKey::prime(3)).await.is_none());

        let stats = store.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits(), 0);
    }

    #[tokio::test]
    async fn test_peek_is_counted_apart_from_hits_and_misses() {
        let store = CacheStore::in_memory();
        store.set(CacheKey::factorial(5), "120").await;

        assert_eq!(store.peek(CacheKey::factorial(5)).await.as_deref(), Some("120"));
        assert!(store.peek(CacheKey::factorial(4)).await.is_none());

        let stats = store.stats();
        assert_eq!(stats.peeks, 2);
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_stats_break_down_fallback_by_domain() {
        let store = CacheStore::in_memory();
        store.set(CacheKey::prime(1), "2").await;
        store.set(CacheKey::prime(2), "3").await;
        store.set(CacheKey::pi(2), "3.14").await;

        let stats = store.stats();
        assert_eq!(stats.fallback_entries, 3);
        assert_eq!(stats.fallback_by_domain[&Domain::Prime], 2);
        assert_eq!(stats.fallback_by_domain[&Domain::Pi], 1);
        assert_eq!(stats.fallback_by_domain[&Domain::Fibonacci], 0);
    }

    #[tokio::test]
    async fn test_set_writes_both_tiers_with_ttl() {
        let (store, connector) = connected_store().await;

        let outcome = store.set(CacheKey::factorial(5), "120").await;

        assert_eq!(outcome, WriteOutcome::Remote);
        assert_eq!(
            connector.remote.entries.get("fact:5").map(|v| v.value().clone()),
            Some("120".to_string())
        );
        assert_eq!(connector.remote.last_ttl.load(Ordering::SeqCst), 604_800);
        assert!(store.fallback().contains(CacheKey::factorial(5)));
    }

    #[tokio::test]
    async fn test_remote_hit_populates_fallback() {
        let (store, connector) = connected_store().await;
        connector
            .remote
            .entries
            .insert("pi:3".to_string(), "3.142".to_string());

        assert_eq!(store.get(CacheKey::pi(3)).await.as_deref(), Some("3.142"));
        assert_eq!(store.fallback().get(CacheKey::pi(3)).as_deref(), Some("3.142"));
        assert_eq!(store.stats().remote_hits, 1);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_and_disconnects() {
        let (store, connector) = connected_store().await;
        store.set(CacheKey::prime(5), "11").await;

        connector.remote.set_failing(true);

        assert_eq!(store.get(CacheKey::prime(5)).await.as_deref(), Some("11"));
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);

        let stats = store.stats();
        assert_eq!(stats.remote_errors, 1);
        assert_eq!(stats.fallback_hits, 1);
    }

    #[tokio::test]
    async fn test_failed_remote_write_still_reaches_fallback() {
        let (store, connector) = connected_store().await;
        connector.remote.set_failing(true);

        let outcome = store.set(CacheKey::fibonacci(20), "6765").await;

        assert_eq!(outcome, WriteOutcome::FallbackOnly);
        assert_eq!(
            store.fallback().get(CacheKey::fibonacci(20)).as_deref(),
            Some("6765")
        );
        // Link is down now, so later writes skip the remote entirely
        store.set(CacheKey::fibonacci(30), "832040").await;
        assert_eq!(connector.remote.sets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disconnected_link_skips_remote() {
        let connector = Arc::new(MockConnector::new());
        let link = Arc::new(RemoteLink::new(connector.clone(), RetryPolicy::default()));
        let store = CacheStore::new(Some(link), Duration::from_secs(60));

        store.set(CacheKey::pi(2), "3.14").await;
        assert_eq!(store.get(CacheKey::pi(2)).await.as_deref(), Some("3.14"));
        assert_eq!(connector.remote.gets.load(Ordering::SeqCst), 0);
        assert_eq!(connector.remote.sets.load(Ordering::SeqCst), 0);
    }
}
