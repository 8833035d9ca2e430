//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::RetryPolicy;

/// Default TTL applied to every remote cache write (one week).
pub const DEFAULT_TTL_SECS: u64 = 604_800;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote cache URL (`redis://host:port`)
    pub redis_url: String,
    /// Whether to attempt a remote cache connection at all
    pub cache_enabled: bool,
    /// TTL in seconds for remote cache writes
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout for a single connect attempt in milliseconds
    pub connect_timeout_ms: u64,
    /// First reconnect delay in milliseconds
    pub reconnect_initial_ms: u64,
    /// Upper bound for the reconnect delay in milliseconds
    pub reconnect_max_ms: u64,
    /// Interval in seconds between pings of a connected remote
    pub health_check_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Remote cache URL (default: redis://localhost:6379)
    /// - `CACHE_ENABLED` - Connect to the remote cache (default: true)
    /// - `DEFAULT_TTL` - Remote entry TTL in seconds (default: 604800)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CONNECT_TIMEOUT_MS` - Connect attempt timeout (default: 5000)
    /// - `RECONNECT_INITIAL_MS` - First reconnect delay (default: 500)
    /// - `RECONNECT_MAX_MS` - Reconnect delay cap (default: 30000)
    /// - `HEALTH_CHECK_INTERVAL` - Remote ping interval in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_redis_url(&v))
                .unwrap_or(defaults.redis_url),
            cache_enabled: env_or("CACHE_ENABLED", defaults.cache_enabled),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            connect_timeout_ms: env_or("CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            reconnect_initial_ms: env_or("RECONNECT_INITIAL_MS", defaults.reconnect_initial_ms),
            reconnect_max_ms: env_or("RECONNECT_MAX_MS", defaults.reconnect_max_ms),
            health_check_interval: env_or("HEALTH_CHECK_INTERVAL", defaults.health_check_interval),
        }
    }

    /// Remote entry TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Connect attempt timeout as a Duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Backoff policy used by the reconnect task.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.reconnect_initial_ms),
            Duration::from_millis(self.reconnect_max_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            cache_enabled: true,
            default_ttl: DEFAULT_TTL_SECS,
            server_port: 3000,
            connect_timeout_ms: 5000,
            reconnect_initial_ms: 500,
            reconnect_max_ms: 30_000,
            health_check_interval: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Accepts a bare `host:port` and prefixes the redis scheme.
pub fn normalize_redis_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("redis://{}", raw)
    }
}
