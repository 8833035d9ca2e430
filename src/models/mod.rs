//! Request and Response models for the computation API
//!
//! Path-parameter validation plus the DTOs serialized into HTTP responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::Endpoint;
pub use responses::{
    ErrorResponse, FactorialResponse, FibonacciResponse, HealthResponse, PiResponse,
    PrimeResponse, RandomBytesResponse, SortResponse, StatsResponse,
};
