//! Bounded retry with exponential backoff for transient failures
//!
//! Only used around idempotent operations: fan-out sends and store reads.
//! Persistence writes go through conditional creates instead, where a
//! repeated attempt for an already-written id surfaces as a conflict.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::domain::DomainError;

/// Retry policy: attempt count and backoff base. Delay doubles per attempt
/// with a small random jitter on top.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// A policy that never retries (single attempt)
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1));
        let jitter_cap = (self.base_delay.as_millis() as u64 / 2).max(1);
        let jitter = rand::thread_rng().gen_range(0..jitter_cap);
        backoff + Duration::from_millis(jitter)
    }
}

/// Runs `op` up to `policy.max_attempts` times, sleeping between attempts,
/// and returns the last error if every attempt fails.
pub async fn with_retries<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts.max(1) {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                debug!(attempt, error = %error, "Attempt failed");
                last_error = Some(error);
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.delay_for(attempt)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DomainError::internal("Retry loop ran zero attempts")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let calls = AtomicU32::new(0);

        let result = with_retries(&fast_policy(3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, DomainError>(42) }
        })
        .await;

        let value = assert_ok!(result);
        assert_eq!(value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = AtomicU32::new(0);

        let result = with_retries(&fast_policy(3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(DomainError::sink("event_bus", "transient"))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_and_returns_last_error() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retries(&fast_policy(2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DomainError::sink("work_queue", "down")) }
        })
        .await;

        assert_err!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_none_policy_is_single_attempt() {
        let calls = AtomicU32::new(0);

        let _: Result<(), _> = with_retries(&RetryPolicy::none(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DomainError::sink("notifier", "down")) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
