//! Retrying transient failures.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use linkmark_core::BookmarkError;
use serde::Deserialize;
use tracing::debug;

use crate::config::serde_millis;
use crate::error::SyncError;

/// Errors that can tell whether a retry may help.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for BookmarkError {
    fn is_transient(&self) -> bool {
        BookmarkError::is_transient(self)
    }
}

impl Transient for SyncError {
    fn is_transient(&self) -> bool {
        SyncError::is_transient(self)
    }
}

/// Exponential backoff settings for [`retry_io`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub times: u32,
    /// Delay before the second attempt.
    #[serde(rename = "initial_delay_ms", with = "serde_millis")]
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    #[serde(rename = "max_delay_ms", with = "serde_millis")]
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            times: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
            factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Self {
            times: 1,
            ..Self::default()
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        Duration::from_secs_f64(current.as_secs_f64() * self.factor).min(self.max_delay)
    }
}

/// Runs `op` until it succeeds, fails permanently, or runs out of attempts.
///
/// Only errors whose [`Transient::is_transient`] holds are retried. The
/// error from the last attempt is returned.
pub async fn retry_io<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: Transient + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut delay = policy.initial_delay;

    for attempt in 1..policy.times.max(1) {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                debug!(attempt, "Transient failure, retrying in {:?}: {}", delay, e);
            },
            Err(e) => return Err(e),
        }

        tokio::time::sleep(delay).await;
        delay = policy.next_delay(delay);
    }

    op().await
}
