//! Bounded retry with exponential backoff for page fetches.
//!
//! ```text
//! Idle --> Attempting --[200]--------------------------> Success
//!              |  \-----[non-200 / network error]------> Failure (no retry)
//!              |
//!          [timeout] --[attempts left]--> Retrying --(sleep, delay *= 2)--> Attempting
//!              \--------[none left]-----> Exhausted --> Failure(Timeout)
//! ```

use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::FetchOutcome;
use crate::traits::Fetcher;

/// How many times to attempt a fetch and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Always at least 1.
    pub max_attempts: u32,
    /// Wait before the first retry.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: config.initial_backoff,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-indexed).
    ///
    /// With the default 2s initial delay: 2s, 4s, 8s, ...
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }

    /// Worst-case cumulative sleep across a fully exhausted fetch.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.delay_after_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Wraps a single-attempt [`Fetcher`] with timeout retries.
///
/// Only [`FetchError::Timeout`] is retried. Status and network errors
/// return immediately.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<F: Fetcher> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: Fetcher> RetryingFetcher<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<F: Fetcher> Fetcher for RetryingFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.inner.fetch(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() => {
                    if attempt >= max_attempts {
                        tracing::warn!(%url, attempts = attempt, "All fetch attempts timed out");
                        return Err(FetchError::Timeout { attempts: attempt });
                    }
                    let delay = self.policy.delay_after_attempt(attempt);
                    tracing::warn!(
                        %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Fetch attempt timed out, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Fetch failed");
                    return Err(e);
                }
            }
        }
    }
}
