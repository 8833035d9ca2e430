//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - Reconnect: redials the remote cache with backoff and pings it while up

mod reconnect;

pub use reconnect::spawn_reconnect_task;
