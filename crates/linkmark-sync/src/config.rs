//! Sync layer configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::SyncError;
use crate::network::RetryPolicy;

/// Prefix for environment variable overrides, e.g. `LINKMARK_API_THROTTLE_MS`.
pub const ENV_PREFIX: &str = "LINKMARK";

/// Configuration for rate limiting, retries and the periodic scheduler.
///
/// The sync cadence itself is a user preference
/// ([`SyncInterval`](linkmark_core::SyncInterval)), not part of this struct.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Minimum spacing between two calls to the remote service.
    #[serde(rename = "api_throttle_ms", with = "serde_millis")]
    pub api_throttle: Duration,

    /// Consecutive failures tolerated before the wake period is stretched.
    pub max_failures: u32,

    /// Multiplier applied to the wake period once backing off.
    pub backoff_multiplier: f64,

    /// Longest wake period reachable through backoff.
    #[serde(rename = "max_backoff_ms", with = "serde_millis")]
    pub max_backoff: Duration,

    /// Upper bound for a single sync pass.
    #[serde(rename = "sync_timeout_ms", with = "serde_millis")]
    pub sync_timeout: Duration,

    /// Retry policy for individual remote calls.
    pub retry: RetryPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_throttle: Duration::from_secs(3),
            max_failures: 3,
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(48 * 3600),
            sync_timeout: Duration::from_secs(600),
            retry: RetryPolicy::default(),
        }
    }
}

impl SyncConfig {
    /// Creates a new builder for SyncConfig.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Loads configuration from an optional file plus `LINKMARK_*` variables.
    ///
    /// Nested keys use a double underscore: `LINKMARK_RETRY__TIMES=3`.
    /// Missing keys keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SyncError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading sync configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SyncError::invalid_config(e.to_string()))?;

        let config: SyncConfig = settings
            .try_deserialize()
            .map_err(|e| SyncError::invalid_config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.backoff_multiplier < 1.0 {
            return Err(SyncError::invalid_config(
                "backoff_multiplier must be at least 1.0",
            ));
        }
        if self.sync_timeout.is_zero() {
            return Err(SyncError::invalid_config("sync_timeout must be positive"));
        }
        if self.retry.times == 0 {
            return Err(SyncError::invalid_config("retry.times must be at least 1"));
        }
        if self.retry.factor < 1.0 {
            return Err(SyncError::invalid_config(
                "retry.factor must be at least 1.0",
            ));
        }
        if self.retry.initial_delay > self.retry.max_delay {
            return Err(SyncError::invalid_config(
                "retry.initial_delay must not exceed retry.max_delay",
            ));
        }
        Ok(())
    }
}

/// Builder for SyncConfig.
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    api_throttle: Option<Duration>,
    max_failures: Option<u32>,
    backoff_multiplier: Option<f64>,
    max_backoff: Option<Duration>,
    sync_timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
}

impl SyncConfigBuilder {
    /// Sets the minimum spacing between remote calls.
    pub fn api_throttle(mut self, throttle: Duration) -> Self {
        self.api_throttle = Some(throttle);
        self
    }

    /// Sets the failures tolerated before backing off.
    pub fn max_failures(mut self, max_failures: u32) -> Self {
        self.max_failures = Some(max_failures);
        self
    }

    /// Sets the backoff multiplier.
    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = Some(multiplier);
        self
    }

    /// Sets the longest wake period reachable through backoff.
    pub fn max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = Some(max_backoff);
        self
    }

    /// Sets the timeout for one sync pass.
    pub fn sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy for remote calls.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<SyncConfig, SyncError> {
        let defaults = SyncConfig::default();
        let config = SyncConfig {
            api_throttle: self.api_throttle.unwrap_or(defaults.api_throttle),
            max_failures: self.max_failures.unwrap_or(defaults.max_failures),
            backoff_multiplier: self
                .backoff_multiplier
                .unwrap_or(defaults.backoff_multiplier),
            max_backoff: self.max_backoff.unwrap_or(defaults.max_backoff),
            sync_timeout: self.sync_timeout.unwrap_or(defaults.sync_timeout),
            retry: self.retry.unwrap_or(defaults.retry),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Reads a [`Duration`] stored as whole milliseconds.
pub(crate) mod serde_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.api_throttle, Duration::from_secs(3));
        assert_eq!(config.max_failures, 3);
        assert_eq!(config.backoff_multiplier, 2.0);
        assert_eq!(config.retry.times, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SyncConfig::builder()
            .api_throttle(Duration::from_millis(500))
            .max_failures(1)
            .build()
            .unwrap();

        assert_eq!(config.api_throttle, Duration::from_millis(500));
        assert_eq!(config.max_failures, 1);
        assert_eq!(config.sync_timeout, SyncConfig::default().sync_timeout);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let err = SyncConfig::builder()
            .backoff_multiplier(0.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));

        let err = SyncConfig::builder()
            .retry(RetryPolicy {
                times: 0,
                ..RetryPolicy::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("retry.times"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let _env = ScopedEnv::with(&[]);

        let config = SyncConfig::load(None).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let _env = ScopedEnv::with(&[]);
        let file = toml_file(
            r#"
api_throttle_ms = 1500
max_failures = 5

[retry]
times = 2
initial_delay_ms = 50
"#,
        );

        let config = SyncConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.api_throttle, Duration::from_millis(1500));
        assert_eq!(config.max_failures, 5);
        assert_eq!(config.retry.times, 2);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(50));
        assert_eq!(config.retry.max_delay, RetryPolicy::default().max_delay);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let _env = ScopedEnv::with(&[
            ("LINKMARK_API_THROTTLE_MS", "250"),
            ("LINKMARK_RETRY__TIMES", "2"),
        ]);

        let config = SyncConfig::load(None).unwrap();

        assert_eq!(config.api_throttle, Duration::from_millis(250));
        assert_eq!(config.retry.times, 2);
        assert_eq!(config.retry.max_delay, RetryPolicy::default().max_delay);
        assert_eq!(config.max_failures, SyncConfig::default().max_failures);
    }

    #[test]
    fn test_environment_beats_file() {
        let _env = ScopedEnv::with(&[
            ("LINKMARK_MAX_FAILURES", "7"),
            ("LINKMARK_RETRY__INITIAL_DELAY_MS", "20"),
        ]);
        let file = toml_file(
            r#"
api_throttle_ms = 1500
max_failures = 5

[retry]
times = 4
initial_delay_ms = 50
"#,
        );

        let config = SyncConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.max_failures, 7);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(20));
        assert_eq!(config.retry.times, 4);
        assert_eq!(config.api_throttle, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_environment_value_is_rejected() {
        let _env = ScopedEnv::with(&[("LINKMARK_BACKOFF_MULTIPLIER", "0.5")]);

        let err = SyncConfig::load(None).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let _env = ScopedEnv::with(&[]);
        let file = toml_file("backoff_multiplier = 0.1");

        let err = SyncConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

    /// Holds the process environment for one test.
    ///
    /// Every `LINKMARK_*` variable is hidden while the scope lives and the
    /// previous values come back on drop.
    struct ScopedEnv {
        saved: Vec<(OsString, OsString)>,
        set: Vec<&'static str>,
        _lock: parking_lot::MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn with(vars: &[(&'static str, &str)]) -> Self {
            let lock = ENV_LOCK.lock();

            let saved: Vec<(OsString, OsString)> = std::env::vars_os()
                .filter(|(key, _)| key.to_string_lossy().starts_with("LINKMARK_"))
                .collect();

            for (key, _) in &saved {
                // SAFETY: test-only env mutation guarded by ENV_LOCK.
                unsafe { std::env::remove_var(key) };
            }
            for (key, value) in vars {
                // SAFETY: test-only env mutation guarded by ENV_LOCK.
                unsafe { std::env::set_var(key, value) };
            }

            Self {
                saved,
                set: vars.iter().map(|(key, _)| *key).collect(),
                _lock: lock,
            }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for key in &self.set {
                // SAFETY: test-only env mutation guarded by ENV_LOCK.
                unsafe { std::env::remove_var(key) };
            }
            for (key, value) in &self.saved {
                // SAFETY: test-only env mutation guarded by ENV_LOCK.
                unsafe { std::env::set_var(key, value) };
            }
        }
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "{contents}").unwrap();
        file
    }
}
