use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::core::IsError;

/// Specifies the backoff strategy for retrying failed scrapes.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses a power delay between retries.
    /// The delay is `base ^ attempt` seconds, with `attempt` counted from 1.
    Power {
        /// The base of the exponent, in seconds.
        base: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// The delay to wait after the given failed attempt (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::Power { base, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let secs = base.powi(exp);
                if !secs.is_finite() || secs < 0.0 {
                    return *max;
                }
                Duration::try_from_secs_f64(secs).map_or(*max, |d| d.min(*max))
            }
        }
    }
}

/// Configuration for the retry policy composed around the scrape step.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables retrying. When disabled, every operation runs once.
    pub enabled: bool,
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// A list of HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff: Backoff::Power {
                base: 2.0,
                max: Duration::from_secs(60),
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// configured attempts are exhausted. The last error is returned as-is.
pub async fn with_retry<T, F, Fut>(cfg: &RetryConfig, label: &str, mut op: F) -> Result<T, IsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IsError>>,
{
    let attempts = cfg.attempts();
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts && e.is_retryable(cfg) => {
                let delay = cfg.backoff.delay(attempt);
                warn!(
                    "{label} attempt {attempt}/{attempts} failed: {e}. Retrying in {:.1}s...",
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if attempt > 1 {
                    error!("{label} failed after {attempt} attempts: {e}");
                }
                return Err(e);
            }
        }
    }
}
