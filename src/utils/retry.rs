//! Retry with exponential backoff for transient server failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::client::SearchError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Backoff delay after the given 1-based failed attempt.
    fn delay_after(&self, attempt: u32) -> Duration {
        let exp = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(exp.min(self.max_delay.as_secs_f64()))
    }
}

/// Execute an async transport call, retrying transient failures.
///
/// Only errors classified transient by [`SearchError::is_transient`]
/// (server-overload and gateway-class statuses, connection failures) are
/// retried; anything else is returned from the first failing attempt.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(
                        "request succeeded on attempt {} after {} transient failures",
                        attempt,
                        attempt - 1
                    );
                }
                return Ok(value);
            }
            Err(error) if error.is_transient() && attempt < config.max_attempts => {
                let delay = config.delay_after(attempt);
                tracing::debug!(
                    "transient error on attempt {}: {}, retrying in {:?}",
                    attempt,
                    error,
                    delay
                );
                sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}
