//! Cache Module
//!
//! Remote-backed value cache with an in-process fallback per domain.

mod fallback;
mod key;
mod link;
mod remote;
mod stats;
mod store;

#[cfg(test)]
pub(crate) mod test_support;


// Re-export public types
pub use fallback::MemoryCache;
pub use key::{CacheKey, Domain};
pub use link::{ConnectionState, RemoteLink, RetryPolicy};
pub use remote::{redact_url, Connector, RedisConnector, RedisStore, RemoteStore};
pub use stats::{CacheCounters, CacheStats};
pub use store::{CacheStore, ValueCache, WriteOutcome};
