//! Request throttling.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

use crate::config::SyncConfig;

/// Runs remote calls while respecting the service's rate limits.
#[async_trait]
pub trait RateLimitRunner: Send + Sync {
    /// Runs `body` with the runner's default throttle.
    async fn run<T, F, Fut>(&self, body: F) -> T
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send;

    /// Runs `body`, keeping the next call at least `throttle` away.
    async fn run_with<T, F, Fut>(&self, throttle: Duration, body: F) -> T
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send;
}

/// A runner that spaces calls by a fixed throttle.
///
/// If no call started within the last throttle window the body runs
/// straight away. Otherwise it waits until the window has passed. Waiting
/// callers are served one at a time, in order.
#[derive(Debug)]
pub struct ApiRateLimitRunner {
    throttle: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl ApiRateLimitRunner {
    /// Creates a runner with the given default throttle.
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            next_slot: Mutex::new(None),
        }
    }

    /// Creates a runner spaced by the configured `api_throttle`.
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.api_throttle)
    }

    /// Returns the default throttle.
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    async fn acquire(&self, throttle: Duration) {
        let mut next_slot = self.next_slot.lock().await;

        if let Some(at) = *next_slot {
            trace!("Waiting for rate limit slot");
            sleep_until(at).await;
        }

        *next_slot = Some(Instant::now() + throttle);
    }
}

#[async_trait]
impl RateLimitRunner for ApiRateLimitRunner {
    async fn run<T, F, Fut>(&self, body: F) -> T
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send,
    {
        self.run_with(self.throttle, body).await
    }

    async fn run_with<T, F, Fut>(&self, throttle: Duration, body: F) -> T
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send,
    {
        self.acquire(throttle).await;
        body().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_runs_immediately() {
        let runner = ApiRateLimitRunner::new(Duration::from_secs(3));
        let start = Instant::now();

        let value = runner.run(|| async { 7 }).await;

        assert_eq!(value, 7);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_calls_are_spaced() {
        let runner = ApiRateLimitRunner::new(Duration::from_secs(3));
        let start = Instant::now();

        runner.run(|| async {}).await;
        runner.run(|| async {}).await;
        runner.run(|| async {}).await;

        assert!(start.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_window_passed() {
        let runner = ApiRateLimitRunner::new(Duration::from_secs(3));

        runner.run(|| async {}).await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let start = Instant::now();
        runner.run(|| async {}).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_api_throttle() {
        let config = SyncConfig::builder()
            .api_throttle(Duration::from_millis(250))
            .build()
            .unwrap();
        let runner = ApiRateLimitRunner::from_config(&config);
        assert_eq!(runner.throttle(), Duration::from_millis(250));

        let start = Instant::now();
        runner.run(|| async {}).await;
        runner.run(|| async {}).await;

        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_overrides_throttle() {
        let runner = ApiRateLimitRunner::new(Duration::from_secs(3));
        let start = Instant::now();

        runner.run_with(Duration::from_secs(10), || async {}).await;
        runner.run(|| async {}).await;

        assert!(start.elapsed() >= Duration::from_secs(10));
    }
}
