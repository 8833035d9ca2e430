//! Pi from Machin's formula, evaluated in `f64`.
//!
//! Double precision caps accuracy at roughly 15 significant digits. Longer
//! outputs are the exact decimal expansion of the nearest `f64`, so they are
//! stable across calls but not true digits of pi past that point.

use super::{offload, ComputeEngine, SENTINEL};
use crate::cache::CacheKey;

/// Series terms per requested digit.
pub const PI_TERMS_PER_DIGIT: u64 = 10;

/// Hard cap on series terms.
pub const PI_MAX_TERMS: u64 = 10_000;

/// Number of arctangent series terms used for `digits`.
pub fn pi_terms(digits: u64) -> u64 {
    digits.saturating_mul(PI_TERMS_PER_DIGIT).min(PI_MAX_TERMS)
}

/// Truncated Taylor series for arctan(x), |x| < 1.
fn arctan_series(x: f64, terms: u64) -> f64 {
    let x_squared = x * x;
    let mut power = x;
    let mut sum = 0.0;
    for k in 0..terms {
        let term = power / (2 * k + 1) as f64;
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= x_squared;
        if power == 0.0 {
            break;
        }
    }
    sum
}

/// pi = 16 arctan(1/5) - 4 arctan(1/239)
pub fn machin_pi(terms: u64) -> f64 {
    16.0 * arctan_series(1.0 / 5.0, terms) - 4.0 * arctan_series(1.0 / 239.0, terms)
}

impl ComputeEngine {
    /// Pi formatted with `digits` decimal places. Non-positive input yields `"3"`.
    pub async fn pi(&self, digits: i64) -> String {
        if digits <= 0 {
            return "3".to_string();
        }

        let digits = digits as u64;
        let key = CacheKey::pi(digits);
        if let Some(hit) = self.cache().get(key).await {
            return hit;
        }

        let Some(value) = offload(move || {
            format!("{:.*}", digits as usize, machin_pi(pi_terms(digits)))
        })
        .await
        else {
            return SENTINEL.to_string();
        };
        self.cache().set(key, &value).await;
        value
    }
}
