//! API Module
//!
//! HTTP handlers and routing for the computation server.
//!
//! # Endpoints
//! - `GET /fibonacci/:n`, `GET /prime/:n`, `GET /factorial/:n`, `GET /pi/:digits`
//!   - cached computations
//! - `GET /random-bytes/:n`, `GET /sort/:n` - uncached generators
//! - `GET /stats` - cache statistics
//! - `GET /health` - health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
