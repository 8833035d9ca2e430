//! Property-Based Tests for the Computation Engine
//!
//! Uses proptest to check the numeric identities each function must satisfy.

use num_bigint::BigUint;
use proptest::prelude::*;
use std::future::Future;

use crate::compute::{sieve_primes, ComputeEngine, MAX_FACTORIAL, MAX_FIBONACCI, MAX_PRIME_INDEX};

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn big(text: &str) -> BigUint {
    text.parse().unwrap()
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // F(n) = F(n-1) + F(n-2), whatever order the cache was warmed in
    #[test]
    fn prop_fibonacci_recurrence(n in 2i64..=MAX_FIBONACCI as i64, warm in 0i64..=MAX_FIBONACCI as i64) {
        let engine = ComputeEngine::in_memory();
        let (f, f1, f2) = block_on(async {
            engine.fibonacci(warm).await;
            (
                engine.fibonacci(n).await,
                engine.fibonacci(n - 1).await,
                engine.fibonacci(n - 2).await,
            )
        });
        prop_assert_eq!(big(&f), big(&f1) + big(&f2));
    }

    // n! / (n-1)! = n, including results resumed from cached prefixes
    #[test]
    fn prop_factorial_ratio(n in 2i64..=MAX_FACTORIAL as i64, warm in 0i64..=MAX_FACTORIAL as i64) {
        let engine = ComputeEngine::in_memory();
        let (f, f1) = block_on(async {
            engine.factorial(warm).await;
            (engine.factorial(n).await, engine.factorial(n - 1).await)
        });
        prop_assert_eq!(big(&f), big(&f1) * BigUint::from(n as u64));
    }

    // nth_prime(n) is prime and there are exactly n - 1 primes below it
    #[test]
    fn prop_nth_prime_is_nth(n in 1i64..=MAX_PRIME_INDEX as i64) {
        let engine = ComputeEngine::in_memory();
        let p: u64 = block_on(engine.nth_prime(n)).parse().unwrap();

        prop_assert!(is_prime(p));
        let below = sieve_primes((p - 1) as usize).len() as i64;
        prop_assert_eq!(below, n - 1);
    }

    // Warm-cache answers are byte-identical to cold ones
    #[test]
    fn prop_warm_equals_cold(n in 0i64..=MAX_FIBONACCI as i64) {
        let engine = ComputeEngine::in_memory();
        let (cold, warm) = block_on(async {
            (engine.fibonacci(n).await, engine.fibonacci(n).await)
        });
        prop_assert_eq!(cold, warm);
    }
}
