//! numcache - numeric computation server with a resilient value cache
//!
//! Serves Fibonacci, n-th prime, factorial and Pi over HTTP. Results are
//! cached in Redis when it is reachable and in per-process maps always.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use numcache::api::create_router;
use numcache::cache::redact_url;
use numcache::{spawn_reconnect_task, AppState, Config};

/// Main entry point for the computation server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache store and computation engine
/// 4. Try the remote cache once; failure only degrades to the fallback
/// 5. Start the background reconnect task
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "numcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting numcache server");

    let config = Config::from_env();
    info!(
        redis_url = %redact_url(&config.redis_url),
        cache_enabled = config.cache_enabled,
        default_ttl = config.default_ttl,
        port = config.server_port,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);

    let reconnect_handle = match state.cache.link() {
        Some(link) => {
            if let Err(e) = link.connect().await {
                warn!(
                    error = %e,
                    target_url = %link.target(),
                    "Remote cache unavailable at startup, serving from fallback"
                );
            }
            Some(spawn_reconnect_task(
                link.clone(),
                Duration::from_secs(config.health_check_interval),
            ))
        }
        None => {
            info!("Remote cache disabled, serving from fallback only");
            None
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reconnect_handle))
        .await
        .context("server terminated unexpectedly")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the
/// reconnect task.
async fn shutdown_signal(reconnect_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = reconnect_handle {
        handle.abort();
        warn!("Reconnect task aborted");
    }
}
