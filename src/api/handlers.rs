//! API Handlers
//!
//! HTTP request handlers for each computation endpoint.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::Uri,
    Json,
};

use crate::cache::{CacheStore, RedisConnector, RemoteLink};
use crate::compute::{random_bytes, random_sort, ComputeEngine};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    Endpoint, FactorialResponse, FibonacciResponse, HealthResponse, PiResponse, PrimeResponse,
    RandomBytesResponse, SortResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The engine computes through the same `CacheStore` exposed here for
/// stats and health reporting.
#[derive(Clone)]
pub struct AppState {
    /// Remote-with-fallback cache
    pub cache: Arc<CacheStore>,
    /// Memoized computations over `cache`
    pub engine: ComputeEngine,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        let cache = Arc::new(cache);
        Self {
            engine: ComputeEngine::new(cache.clone()),
            cache,
        }
    }

    /// State with no remote cache; everything is served from the fallback.
    pub fn in_memory() -> Self {
        Self::new(CacheStore::in_memory())
    }

    /// Creates a new AppState from configuration.
    ///
    /// The remote link starts disconnected; the caller decides when to dial.
    pub fn from_config(config: &Config) -> Self {
        let link = config.cache_enabled.then(|| {
            Arc::new(RemoteLink::new(
                Arc::new(RedisConnector::new(
                    config.redis_url.clone(),
                    config.connect_timeout(),
                )),
                config.retry_policy(),
            ))
        });
        Self::new(CacheStore::new(link, config.ttl()))
    }
}

/// Runs a computation on its own task so it finishes even if the client
/// goes away; a panic surfaces as a 500.
///
/// Only the cache I/O runs here. The engine moves the arithmetic onto the
/// blocking pool.
async fn run_to_completion<F>(future: F) -> Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future)
        .await
        .map_err(|e| ApiError::Internal(format!("computation task failed: {}", e)))
}

fn parse(endpoint: Endpoint, raw: &str) -> Result<u64> {
    endpoint.validate(raw).map_err(ApiError::InvalidInput)
}

/// Handler for GET /fibonacci/:n
pub async fn fibonacci_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FibonacciResponse>> {
    let n = parse(Endpoint::Fibonacci, &raw)?;
    let engine = state.engine.clone();
    let fibonacci = run_to_completion(async move { engine.fibonacci(n as i64).await }).await?;

    Ok(Json(FibonacciResponse { n, fibonacci }))
}

/// Handler for GET /prime/:n
pub async fn prime_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<PrimeResponse>> {
    let n = parse(Endpoint::Prime, &raw)?;
    let engine = state.engine.clone();
    let prime = run_to_completion(async move { engine.nth_prime(n as i64).await }).await?;

    Ok(Json(PrimeResponse { n, prime }))
}

/// Handler for GET /factorial/:n
pub async fn factorial_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FactorialResponse>> {
    let n = parse(Endpoint::Factorial, &raw)?;
    let engine = state.engine.clone();
    let factorial = run_to_completion(async move { engine.factorial(n as i64).await }).await?;

    Ok(Json(FactorialResponse { n, factorial }))
}

/// Handler for GET /pi/:digits
pub async fn pi_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<PiResponse>> {
    let digits = parse(Endpoint::Pi, &raw)?;
    let engine = state.engine.clone();
    let pi = run_to_completion(async move { engine.pi(digits as i64).await }).await?;

    Ok(Json(PiResponse { digits, pi }))
}

/// Handler for GET /random-bytes/:n
pub async fn random_bytes_handler(Path(raw): Path<String>) -> Result<Json<RandomBytesResponse>> {
    let n = parse(Endpoint::RandomBytes, &raw)?;
    Ok(Json(RandomBytesResponse {
        n,
        bytes: random_bytes(n as usize),
    }))
}

/// Handler for GET /sort/:n
pub async fn sort_handler(Path(raw): Path<String>) -> Result<Json<SortResponse>> {
    let n = parse(Endpoint::Sort, &raw)?;
    Ok(Json(SortResponse {
        n,
        sorted: random_sort(n as usize),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.connection_state(),
        &state.cache.stats(),
    ))
}

/// Handler for GET /health
///
/// Reports healthy regardless of the remote cache; a down cache only
/// degrades hit rate.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.connection_state()))
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, ConnectionState};

    #[tokio::test]
    async fn test_fibonacci_handler() {
        let state = AppState::in_memory();

        let response = fibonacci_handler(State(state), Path("10".to_string()))
            .await
            .unwrap();
        assert_eq!(response.n, 10);
        assert_eq!(response.fibonacci, "55");
    }

    #[tokio::test]
    async fn test_handlers_share_state_cache() {
        let state = AppState::in_memory();

        factorial_handler(State(state.clone()), Path("7".to_string()))
            .await
            .unwrap();

        assert_eq!(
            state.cache.fallback().get(CacheKey::factorial(7)).as_deref(),
            Some("5040")
        );
        assert!(state.cache.stats().writes >= 2);
    }

    #[tokio::test]
    async fn test_prime_handler_rejects_zero() {
        let state = AppState::in_memory();

        let result = prime_handler(State(state), Path("0".to_string())).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_pi_handler() {
        let state = AppState::in_memory();

        let response = pi_handler(State(state), Path("5".to_string())).await.unwrap();
        assert_eq!(response.digits, 5);
        assert_eq!(response.pi, "3.14159");
    }

    #[tokio::test]
    async fn test_random_handlers() {
        let bytes = random_bytes_handler(Path("16".to_string())).await.unwrap();
        assert_eq!(bytes.bytes.len(), 32);

        let sorted = sort_handler(Path("25".to_string())).await.unwrap();
        assert_eq!(sorted.sorted.len(), 25);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::in_memory();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.misses, 0);
        assert_eq!(response.connection, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(AppState::in_memory())).await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_from_config_without_cache_has_no_link() {
        let config = Config {
            cache_enabled: false,
            ..Config::default()
        };
        let state = AppState::from_config(&config);
        assert!(state.cache.link().is_none());
    }
}
