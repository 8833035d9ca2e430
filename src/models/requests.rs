//! Request validation for the computation API
//!
//! Every endpoint takes a single integer path parameter with fixed bounds.

use crate::compute::{
    MAX_FACTORIAL, MAX_FIBONACCI, MAX_PI_DIGITS, MAX_PRIME_INDEX, MAX_RANDOM_BYTES,
    MAX_SORT_SIZE,
};

/// Endpoint whose path parameter is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Fibonacci,
    Prime,
    Factorial,
    Pi,
    RandomBytes,
    Sort,
}

impl Endpoint {
    /// Name of the path parameter, echoed back in responses.
    pub fn param(self) -> &'static str {
        match self {
            Endpoint::Pi => "digits",
            _ => "n",
        }
    }

    /// Inclusive bounds for the parameter.
    pub fn bounds(self) -> (u64, u64) {
        match self {
            Endpoint::Fibonacci => (0, MAX_FIBONACCI),
            Endpoint::Prime => (1, MAX_PRIME_INDEX),
            Endpoint::Factorial => (0, MAX_FACTORIAL),
            Endpoint::Pi => (1, MAX_PI_DIGITS),
            Endpoint::RandomBytes => (1, MAX_RANDOM_BYTES),
            Endpoint::Sort => (1, MAX_SORT_SIZE),
        }
    }

    /// Parses and range-checks a raw path segment.
    ///
    /// Returns the error message on failure.
    pub fn validate(self, raw: &str) -> Result<u64, String> {
        let name = self.param();
        let (min, max) = self.bounds();

        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be an integer", name))?;

        if value < min as i64 || value > max as i64 {
            return Err(format!("{} must be between {} and {}", name, min, max));
        }
        Ok(value as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(Endpoint::Fibonacci.validate("0"), Ok(0));
        assert_eq!(Endpoint::Fibonacci.validate("1000"), Ok(1000));
        assert_eq!(Endpoint::Prime.validate("1"), Ok(1));
        assert_eq!(Endpoint::Pi.validate("50"), Ok(50));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(
            Endpoint::Fibonacci.validate("1001"),
            Err("n must be between 0 and 1000".to_string())
        );
        assert!(Endpoint::Prime.validate("0").is_err());
        assert!(Endpoint::Factorial.validate("171").is_err());
        assert!(Endpoint::Factorial.validate("-1").is_err());
        assert_eq!(
            Endpoint::Pi.validate("51"),
            Err("digits must be between 1 and 50".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_non_integer() {
        assert_eq!(
            Endpoint::Sort.validate("ten"),
            Err("n must be an integer".to_string())
        );
        assert!(Endpoint::RandomBytes.validate("1.5").is_err());
        assert!(Endpoint::RandomBytes.validate("99999999999999999999").is_err());
    }
}
