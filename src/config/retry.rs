//! Transient-failure retry policy.

use std::time::Duration;

use rand::Rng;

/// Retry policy for transient failures.
///
/// Only read-style requests (GET and DELETE) are ever retried; create and
/// update calls rely on the server-side `request_id` idempotency key instead.
///
/// The delay before retry `n` (1-based) is
/// `initial_interval * backoff_factor^(n-1)`, scaled by a random factor drawn
/// from `[1 - jitter, 1 + jitter]`. A server `Retry-After` hint replaces that
/// delay, clamped to `max_retry_after`.
///
/// # Example
///
/// ```rust
/// use airwallex_api::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy {
///     initial_interval: Duration::from_millis(1),
///     ..RetryPolicy::default()
/// };
/// assert_eq!(policy.max_attempts, 3);
/// assert!(policy.is_retryable_status(503));
/// assert!(!policy.is_retryable_status(404));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per logical call, including the first.
    pub max_attempts: u32,
    /// Base delay before the first retry.
    pub initial_interval: Duration,
    /// Multiplier applied to the delay for each further retry.
    pub backoff_factor: f64,
    /// Relative jitter in `[0, 1]`.
    pub jitter: f64,
    /// Status codes treated as transient.
    pub retry_statuses: Vec<u16>,
    /// Upper bound on a server-sent `Retry-After` delay.
    pub max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_millis(500),
            backoff_factor: 2.0,
            jitter: 0.5,
            retry_statuses: vec![429, 500, 502, 503, 504],
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Returns a policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Returns `true` if the status code is in the transient set.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Returns the un-jittered delay before retry number `retry` (1-based).
    #[must_use]
    pub fn base_delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.backoff_factor.max(1.0).powi(exponent);
        let seconds = self.initial_interval.as_secs_f64() * factor;
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    /// Returns the jittered delay before retry number `retry` (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.base_delay(retry);
        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 {
            return base;
        }
        let scale = rand::thread_rng().gen_range((1.0 - jitter)..=(1.0 + jitter));
        Duration::try_from_secs_f64(base.as_secs_f64() * scale).unwrap_or(base)
    }

    /// Returns the delay before retry number `retry`, preferring the server's
    /// `Retry-After` hint up to `max_retry_after`.
    #[must_use]
    pub fn delay_with_hint(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.map_or_else(
            || self.delay_for(retry),
            |hint| hint.min(self.max_retry_after),
        )
    }
}
