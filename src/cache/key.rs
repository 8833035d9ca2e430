//! Cache Key Module
//!
//! Namespaced keys for the four cached computations.

use std::fmt;

use serde::Serialize;

// == Domain ==
/// Computation namespace a cached value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Fibonacci,
    Prime,
    Factorial,
    Pi,
}

impl Domain {
    /// All domains, in fallback-slot order.
    pub const ALL: [Domain; 4] = [
        Domain::Fibonacci,
        Domain::Prime,
        Domain::Factorial,
        Domain::Pi,
    ];

    /// Key prefix used on the wire, including the trailing colon.
    pub fn prefix(self) -> &'static str {
        match self {
            Domain::Fibonacci => "fib:",
            Domain::Prime => "prime:",
            Domain::Factorial => "fact:",
            Domain::Pi => "pi:",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::Fibonacci => "fibonacci",
            Domain::Prime => "prime",
            Domain::Factorial => "factorial",
            Domain::Pi => "pi",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Cache Key ==
/// A `(domain, index)` pair. For pi the index is the digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Domain,
    pub index: u64,
}

impl CacheKey {
    pub fn new(domain: Domain, index: u64) -> Self {
        Self { domain, index }
    }

    pub fn fibonacci(index: u64) -> Self {
        Self::new(Domain::Fibonacci, index)
    }

    pub fn prime(index: u64) -> Self {
        Self::new(Domain::Prime, index)
    }

    pub fn factorial(index: u64) -> Self {
        Self::new(Domain::Factorial, index)
    }

    pub fn pi(digits: u64) -> Self {
        Self::new(Domain::Pi, digits)
    }

    /// Remote store key, e.g. `fib:42`.
    pub fn to_key_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.domain.prefix(), self.index)
    }
}
