//! Exponential backoff with jitter, and the `with_retry` driver loop.

use std::future::Future;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configures retry backoff.
///
/// Default: `{max_attempts: 3, initial_delay_ms: 100, max_delay_ms: 5000,
/// backoff_multiplier: 2.0, jitter: true}`. `max_delay_ms` is not pinned by
/// the source this was distilled from; 5000ms was chosen as a sane ceiling
/// and is open to being overridden by `masc-config`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts before giving up (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay_ms: u64,
    /// Upper bound on any computed delay, before jitter.
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: f64,
    /// Whether to randomize the computed delay within 0.5x-1.5x.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Computes the delay before `attempt` (1-indexed; the delay before the
/// *next* try after `attempt` has failed).
///
/// `calculate_delay(p, 1) == p.initial_delay_ms` when `jitter` is `false`.
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32) -> u64 {
    let exponent = attempt.saturating_sub(1);
    let scaled = policy.initial_delay_ms as f64 * policy.backoff_multiplier.powi(exponent as i32);
    let bounded = scaled.min(policy.max_delay_ms as f64);
    let delay = if policy.jitter {
        let factor = rand::thread_rng().gen_range(0.5..=1.5);
        bounded * factor
    } else {
        bounded
    };
    delay.round().max(0.0) as u64
}

/// The result of [`with_retry`]: either the operation eventually
/// succeeded, or every attempt was exhausted.
#[derive(Debug, Clone)]
pub enum RetryOutcome<T, E> {
    /// The operation succeeded, possibly after retries.
    Success(T),
    /// Every attempt failed.
    Exhausted {
        /// Number of attempts actually made.
        attempts: u32,
        /// The error from the final attempt.
        last_error: E,
    },
}

/// Runs `op` up to `policy.max_attempts` times, sleeping
/// [`calculate_delay`] between attempts whose error `is_retryable` marks as
/// retryable. A non-retryable failure returns immediately as
/// [`RetryOutcome::Exhausted`] with `attempts` set to the attempt it failed
/// on.
pub async fn with_retry<T, E, Fut>(
    op_name: &str,
    policy: &RetryPolicy,
    is_retryable: impl Fn(&E) -> bool,
    mut op: impl FnMut() -> Fut,
) -> RetryOutcome<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return RetryOutcome::Success(value),
            Err(err) => {
                let retryable = is_retryable(&err);
                if !retryable || attempt >= policy.max_attempts {
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: err,
                    };
                }
                let delay_ms = calculate_delay(policy, attempt);
                warn!(op_name, attempt, delay_ms, "retrying after failure");
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_for_attempt_one_is_initial_delay_without_jitter() {
        let policy = RetryPolicy {
            jitter: false,
            ..RetryPolicy::default()
        };
        assert_eq!(calculate_delay(&policy, 1), policy.initial_delay_ms);
    }

    #[test]
    fn delay_follows_the_formula_without_jitter() {
        let policy = RetryPolicy {
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
            jitter: false,
            max_attempts: 5,
        };
        assert_eq!(calculate_delay(&policy, 1), 100);
        assert_eq!(calculate_delay(&policy, 2), 200);
        assert_eq!(calculate_delay(&policy, 3), 400);
    }

    #[test]
    fn delay_is_capped_at_max() {
        let policy = RetryPolicy {
            initial_delay_ms: 100,
            max_delay_ms: 300,
            backoff_multiplier: 2.0,
            jitter: false,
            max_attempts: 10,
        };
        assert_eq!(calculate_delay(&policy, 5), 300);
    }

    #[tokio::test]
    async fn with_retry_succeeds_after_transient_failures() {
        let policy = RetryPolicy {
            initial_delay_ms: 1,
            max_delay_ms: 2,
            jitter: false,
            ..RetryPolicy::default()
        };
        let mut calls = 0;
        let outcome = with_retry(
            "op",
            &policy,
            |_: &&str| true,
            || {
                calls += 1;
                let call = calls;
                async move {
                    if call < 2 {
                        Err("transient")
                    } else {
                        Ok(42)
                    }
                }
            },
        )
        .await;
        assert!(matches!(outcome, RetryOutcome::Success(42)));
    }

    #[tokio::test]
    async fn with_retry_exhausts_after_max_attempts() {
        let policy = RetryPolicy {
            initial_delay_ms: 1,
            max_delay_ms: 1,
            jitter: false,
            max_attempts: 3,
            ..RetryPolicy::default()
        };
        let outcome: RetryOutcome<(), &str> =
            with_retry("op", &policy, |_| true, || async { Err("always") }).await;
        match outcome {
            RetryOutcome::Exhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, "always");
            }
            RetryOutcome::Success(()) => panic!("expected exhaustion"),
        }
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_immediately() {
        let policy = RetryPolicy::default();
        let outcome: RetryOutcome<(), &str> =
            with_retry("op", &policy, |_| false, || async { Err("fatal") }).await;
        match outcome {
            RetryOutcome::Exhausted { attempts, .. } => assert_eq!(attempts, 1),
            RetryOutcome::Success(()) => panic!("expected exhaustion"),
        }
    }
}
