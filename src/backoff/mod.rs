use log::warn;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::settings::FetchSettings;
use crate::errors::UpstreamError;

/// Outcome of a single attempt
pub enum Attempt<T> {
    Done(T),
    /// Transient failure, worth another try
    Retry { status: Option<u16> },
    Fail(UpstreamError),
}

/// Exponential backoff between retries of transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    pub fn from_settings(settings: &FetchSettings) -> Self {
        Self::new(
            settings.max_retries,
            settings.backoff_base_ms,
            settings.backoff_max_ms,
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay before retry number `retry` (0-based): doubles each time, capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Rate limiting and server errors are transient
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }

    /// Drive `attempt` until it succeeds, fails for good, or the retry
    /// budget runs out
    pub async fn run<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T, UpstreamError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let mut last_status = None;

        for number in 0..self.max_attempts() {
            if number > 0 {
                let delay = self.delay_for(number - 1);
                warn!(
                    "Retrying {} in {:?} (attempt {}/{}, last status {:?})",
                    url,
                    delay,
                    number + 1,
                    self.max_attempts(),
                    last_status
                );
                sleep(delay).await;
            }

            match attempt(number).await {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry { status } => last_status = status,
            }
        }

        Err(UpstreamError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.max_attempts(),
            last_status,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&FetchSettings::default())
    }
}
