use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Default attempt budget for one retried operation.
pub const MAX_ATTEMPTS: u32 = 10;
/// Default wall-clock budget for one retried operation.
pub const MAX_TOTAL_DURATION: Duration = Duration::from_secs(120);
/// Base delay before the first retry.
pub const BASE_DELAY_MS: u64 = 1000;
/// Upper bound for any single backoff delay.
pub const MAX_DELAY_MS: u64 = 5000;

/// Failure returned once a [`RetryPolicy`] gives up.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The wall-clock budget ran out before another attempt could start.
    #[error("retry timeout after {}ms", limit.as_millis())]
    Timeout { limit: Duration, attempts: u32 },

    /// Every attempt failed; carries the last underlying failure.
    #[error("{source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E> RetryError<E> {
    /// Number of attempts that were actually made.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Timeout { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Last underlying failure, if the budget was exhausted by attempts.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            Self::Exhausted { source, .. } => Some(source),
            Self::Timeout { .. } => None,
        }
    }
}

/// Bounded retry with capped exponential backoff and no jitter.
///
/// The delay after the failure of attempt `n` (zero-based) is
/// `min(base * 2^n, max_delay)`. The operation may run more than once, so it
/// must be idempotent or uniquely keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub max_total_duration: Duration,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            max_total_duration: MAX_TOTAL_DURATION,
            base_delay: Duration::from_millis(BASE_DELAY_MS),
            max_delay: Duration::from_millis(MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, max_total_duration: Duration) -> Self {
        Self {
            max_attempts,
            max_total_duration,
            ..Self::default()
        }
    }

    pub fn with_delays(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Backoff applied after the failure of `attempt` (zero-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(30));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `operation` until it succeeds or the attempt/time budget is spent.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let start = Instant::now();
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            if start.elapsed() > self.max_total_duration {
                return Err(RetryError::Timeout {
                    limit: self.max_total_duration,
                    attempts: attempt,
                });
            }

            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt + 1 < self.max_attempts {
                        let delay = self.delay_for_attempt(attempt);
                        tracing::warn!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            %error,
                            "attempt failed, retrying"
                        );
                        last_error = Some(error);
                        tokio::time::sleep(delay).await;
                    } else {
                        tracing::warn!(attempt = attempt + 1, %error, "final attempt failed");
                        last_error = Some(error);
                    }
                }
            }
        }

        match last_error {
            Some(source) => Err(RetryError::Exhausted {
                attempts: self.max_attempts,
                source,
            }),
            None => Err(RetryError::Timeout {
                limit: self.max_total_duration,
                attempts: 0,
            }),
        }
    }
}
