//! numcache - numeric computation server with a resilient value cache
//!
//! Serves Fibonacci, n-th prime, factorial and Pi over HTTP. Results are
//! cached in Redis when it is reachable and in per-process maps always.

pub mod api;
pub mod cache;
pub mod compute;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use compute::ComputeEngine;
pub use config::Config;
pub use tasks::spawn_reconnect_task;
