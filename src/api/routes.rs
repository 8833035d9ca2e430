//! API Routes
//!
//! Configures the Axum router with all computation endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    factorial_handler, fibonacci_handler, health_handler, not_found_handler, pi_handler,
    prime_handler, random_bytes_handler, sort_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /fibonacci/:n` - n-th Fibonacci number (0..=1000)
/// - `GET /prime/:n` - n-th prime (1..=10000)
/// - `GET /factorial/:n` - n! (0..=170)
/// - `GET /pi/:digits` - Pi to `digits` decimals (1..=50)
/// - `GET /random-bytes/:n` - n random bytes, hex encoded (1..=1024)
/// - `GET /sort/:n` - n sorted random integers (1..=10000)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/fibonacci/:n", get(fibonacci_handler))
        .route("/prime/:n", get(prime_handler))
        .route("/factorial/:n", get(factorial_handler))
        .route("/pi/:digits", get(pi_handler))
        .route("/random-bytes/:n", get(random_bytes_handler))
        .route("/sort/:n", get(sort_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
