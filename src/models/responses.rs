//! Response DTOs for the computation API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::{CacheStats, ConnectionState, Domain};

/// Response body for GET /fibonacci/:n
#[derive(Debug, Clone, Serialize)]
pub struct FibonacciResponse {
    pub n: u64,
    pub fibonacci: String,
}

/// Response body for GET /prime/:n
#[derive(Debug, Clone, Serialize)]
pub struct PrimeResponse {
    pub n: u64,
    pub prime: String,
}

/// Response body for GET /factorial/:n
#[derive(Debug, Clone, Serialize)]
pub struct FactorialResponse {
    pub n: u64,
    pub factorial: String,
}

/// Response body for GET /pi/:digits
#[derive(Debug, Clone, Serialize)]
pub struct PiResponse {
    pub digits: u64,
    pub pi: String,
}

/// Response body for GET /random-bytes/:n
#[derive(Debug, Clone, Serialize)]
pub struct RandomBytesResponse {
    pub n: u64,
    /// Lowercase hex, two characters per byte
    pub bytes: String,
}

/// Response body for GET /sort/:n
#[derive(Debug, Clone, Serialize)]
pub struct SortResponse {
    pub n: u64,
    pub sorted: Vec<u32>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Remote cache connection state
    pub connection: ConnectionState,
    /// Reads answered by the remote store
    pub remote_hits: u64,
    /// Reads answered by the fallback maps
    pub fallback_hits: u64,
    /// Reads answered by neither
    pub misses: u64,
    /// Factorial prefix lookups, kept out of hits and misses
    pub peeks: u64,
    /// Cache writes, checkpoints included
    pub writes: u64,
    /// Swallowed remote failures
    pub remote_errors: u64,
    /// Entries held in the fallback maps
    pub fallback_entries: usize,
    /// Fallback entries per domain
    pub fallback_by_domain: BTreeMap<Domain, usize>,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(connection: ConnectionState, stats: &CacheStats) -> Self {
        Self {
            connection,
            remote_hits: stats.remote_hits,
            fallback_hits: stats.fallback_hits,
            misses: stats.misses,
            peeks: stats.peeks,
            writes: stats.writes,
            remote_errors: stats.remote_errors,
            fallback_entries: stats.fallback_entries,
            fallback_by_domain: stats.fallback_by_domain.clone(),
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (always "healthy"; a down cache only degrades)
    pub status: String,
    /// Remote cache connection state
    pub cache: ConnectionState,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: ConnectionState) -> Self {
        Self {
            status: "healthy".to_string(),
            cache,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
