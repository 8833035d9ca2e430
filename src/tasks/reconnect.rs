//! Remote Cache Reconnect Task
//!
//! Background task that redials the remote cache with backoff while it is
//! down and pings it while it is up.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{ConnectionState, RemoteLink};

/// Spawns the reconnect / health-check loop for `link`.
///
/// While disconnected, connect attempts are spaced by the link's
/// `RetryPolicy`. While connected, the remote is pinged every
/// `health_interval`; a failed ping marks the link disconnected.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_reconnect_task(link.clone(), Duration::from_secs(10));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_reconnect_task(link: Arc<RemoteLink>, health_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let policy = link.policy();
        info!(
            target_url = %link.target(),
            initial_delay_ms = policy.initial_delay.as_millis() as u64,
            max_delay_ms = policy.max_delay.as_millis() as u64,
            "Starting remote cache reconnect task"
        );

        let mut attempt: u32 = 0;
        loop {
            match link.state() {
                ConnectionState::Connected => {
                    attempt = 0;
                    tokio::time::sleep(health_interval).await;

                    if let Some(store) = link.store() {
                        match store.ping().await {
                            Ok(()) => debug!("Remote cache ping ok"),
                            Err(e) => link.mark_failed(&e),
                        }
                    }
                }
                // Another caller is dialling
                ConnectionState::Connecting => {
                    tokio::time::sleep(policy.initial_delay).await;
                }
                ConnectionState::Disconnected => {
                    tokio::time::sleep(policy.delay_for(attempt)).await;

                    match link.connect().await {
                        Ok(()) => {
                            info!(attempts = attempt + 1, "Remote cache reconnected");
                            attempt = 0;
                        }
                        Err(e) => {
                            debug!(attempt, error = %e, "Remote cache reconnect failed");
                            attempt = attempt.saturating_add(1);
                        }
                    }
                }
            }
        }
    })
}
