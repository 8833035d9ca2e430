//! In-memory remote store doubles used by unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::cache::remote::{Connector, RemoteStore};
use crate::error::{CacheError, CacheResult};

/// Remote store backed by a map; can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MockRemote {
    pub entries: DashMap<String, String>,
    pub failing: AtomicBool,
    pub gets: AtomicU64,
    pub sets: AtomicU64,
    pub last_ttl: AtomicU64,
}

impl MockRemote {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> CacheResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CacheError::Backend("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.last_ttl.store(ttl.as_secs(), Ordering::SeqCst);
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Connector handing out one shared `MockRemote`.
#[derive(Debug, Default)]
pub struct MockConnector {
    pub remote: Arc<MockRemote>,
    pub refuse: AtomicBool,
    pub attempts: AtomicU64,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        let connector = Self::default();
        connector.refuse.store(true, Ordering::SeqCst);
        connector
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> CacheResult<Arc<dyn RemoteStore>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.refuse.load(Ordering::SeqCst) {
            return Err(CacheError::Connection("connection refused".into()));
        }
        let store: Arc<dyn RemoteStore> = self.remote.clone();
        Ok(store)
    }

    fn target(&self) -> String {
        "mock://memory".to_string()
    }
}

/// Connector that never succeeds.
#[derive(Debug, Default)]
pub struct FailingConnector;

#[async_trait]
impl Connector for FailingConnector {
    async fn connect(&self) -> CacheResult<Arc<dyn RemoteStore>> {
        Err(CacheError::Timeout("connect after 5000ms".into()))
    }

    fn target(&self) -> String {
        "redis://unreachable:6379".to_string()
    }
}
