//! Remote Link Module
//!
//! Tracks the connection state of the optional remote store and owns the
//! live handle while connected.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::remote::{Connector, RemoteStore};
use crate::error::{CacheError, CacheResult};

// == Connection State ==
/// Connection state of the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
}

impl From<u8> for ConnectionState {
    fn from(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

// == Retry Policy ==
/// Bounded exponential backoff between reconnect attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
}

impl RetryPolicy {
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
            multiplier: 2,
        }
    }

    /// Delay before retry number `attempt` (zero-based), capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.multiplier
            .checked_pow(attempt)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(30))
    }
}

// == Remote Link ==
/// Shared, process-wide handle to the remote store.
///
/// Request paths only read the state; connecting is left to startup and the
/// reconnect task.
pub struct RemoteLink {
    connector: Arc<dyn Connector>,
    store: RwLock<Option<Arc<dyn RemoteStore>>>,
    state: AtomicU8,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RemoteLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLink")
            .field("target", &self.connector.target())
            .field("state", &self.state())
            .field("policy", &self.policy)
            .finish()
    }
}

impl RemoteLink {
    /// Creates a disconnected link. Nothing is dialled until `connect`.
    pub fn new(connector: Arc<dyn Connector>, policy: RetryPolicy) -> Self {
        Self {
            connector,
            store: RwLock::new(None),
            state: AtomicU8::new(ConnectionState::Disconnected as u8),
            policy,
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn target(&self) -> String {
        self.connector.target()
    }

    /// Live store handle, only while connected.
    pub fn store(&self) -> Option<Arc<dyn RemoteStore>> {
        if !self.is_connected() {
            return None;
        }
        self.store.read().clone()
    }

    // == Connect ==
    /// Single connect attempt: Disconnected -> Connecting -> Connected | Disconnected.
    pub async fn connect(&self) -> CacheResult<()> {
        self.set_state(ConnectionState::Connecting);

        match self.connector.connect().await {
            Ok(store) => {
                let backend = store.name();
                *self.store.write() = Some(store);
                self.set_state(ConnectionState::Connected);
                info!(
                    target_url = %self.connector.target(),
                    backend,
                    "Remote cache connected"
                );
                Ok(())
            }
            Err(e) => {
                *self.store.write() = None;
                self.set_state(ConnectionState::Disconnected);
                Err(e)
            }
        }
    }

    // == Mark Failed ==
    /// Drops the live handle after an operation error so the reconnect task
    /// takes over.
    pub fn mark_failed(&self, error: &CacheError) {
        let previous = self
            .state
            .swap(ConnectionState::Disconnected as u8, Ordering::AcqRel);
        *self.store.write() = None;

        if ConnectionState::from(previous) == ConnectionState::Connected {
            warn!(error = %error, "Remote cache marked disconnected, serving from fallback");
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
    }
}
