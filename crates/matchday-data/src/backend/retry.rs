//! Retry with exponential backoff for transient backend failures.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{BackendError, BackendResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum attempts, the first try included
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Cap on the backoff delay
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each attempt
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Self::default()
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay = self.initial_delay.mul_f64(multiplier);
        delay.min(self.max_delay)
    }
}

/// Runs backend operations, retrying those that fail with a retryable error.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> BackendResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BackendResult<T>>,
    {
        let attempts = self.config.max_attempts.max(1);
        let mut last_error: Option<BackendError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.config.delay_for_attempt(attempt - 1);
                tokio::time::sleep(delay).await;
            }
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < attempts => {
                    warn!(attempt = attempt + 1, error = %err, "retrying backend request");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        // Unreachable unless max_attempts was 0; the loop ran at least once.
        Err(last_error.unwrap_or_else(|| BackendError::new("retry attempts exhausted")))
    }
}
