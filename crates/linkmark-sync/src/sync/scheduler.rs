//! Background periodic sync scheduler.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use linkmark_core::SyncInterval;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{SyncReport, SyncState, SyncTask};
use crate::config::SyncConfig;
use crate::connectivity::ConnectivityGate;
use crate::error::SyncError;

/// Result of a single scheduled wake.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The task ran to completion.
    Completed(SyncReport),
    /// The device was offline; the task was not started.
    SkippedOffline,
    /// The task failed, timed out, or another pass was still running.
    Failed(SyncError),
}

impl SyncOutcome {
    /// Returns true if the task ran successfully.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Handle for controlling a running scheduler.
pub struct SyncHandle {
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
    /// The cadence the scheduler was started with.
    interval: SyncInterval,
}

impl SyncHandle {
    /// Signals the scheduler to stop.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Returns the cadence this schedule runs on.
    pub fn interval(&self) -> SyncInterval {
        self.interval
    }

    /// Returns true once the scheduler loop has exited.
    pub fn is_finished(&self) -> bool {
        self.shutdown_tx.is_closed()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SyncHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHandle")
            .field("interval", &self.interval)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct Backoff {
    base: Duration,
    current: Duration,
}

/// Runs a [`SyncTask`] on the user's chosen cadence.
///
/// Every wake consults the [`ConnectivityGate`] first and skips the pass
/// entirely while offline.
#[derive(Clone)]
pub struct PeriodicSyncScheduler {
    /// The work performed by each pass.
    task: Arc<dyn SyncTask>,
    /// Outcome tracking shared with callers.
    state: Arc<SyncState>,
    /// Reachability check performed before each pass.
    gate: ConnectivityGate,
    /// Configuration.
    config: SyncConfig,
    /// Wake period, stretched after repeated failures.
    backoff: Arc<Mutex<Option<Backoff>>>,
    /// Held while a pass is running.
    running: Arc<tokio::sync::Mutex<()>>,
}

impl PeriodicSyncScheduler {
    /// Creates a new scheduler.
    pub fn new(
        task: Arc<dyn SyncTask>,
        state: Arc<SyncState>,
        gate: ConnectivityGate,
        config: SyncConfig,
    ) -> Self {
        Self {
            task,
            state,
            gate,
            config,
            backoff: Arc::new(Mutex::new(None)),
            running: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Creates a scheduler with default configuration.
    pub fn with_defaults(
        task: Arc<dyn SyncTask>,
        state: Arc<SyncState>,
        gate: ConnectivityGate,
    ) -> Self {
        Self::new(task, state, gate, SyncConfig::default())
    }

    /// Returns the shared sync state.
    pub fn state(&self) -> &Arc<SyncState> {
        &self.state
    }

    /// Returns the current wake period, if a schedule is active.
    pub fn current_period(&self) -> Option<Duration> {
        self.backoff.lock().map(|b| b.current)
    }

    /// Forgets the wake period once the running schedule is cancelled.
    pub fn clear_schedule(&self) {
        *self.backoff.lock() = None;
    }

    /// Starts the background loop for `interval`.
    ///
    /// Returns `None` without scheduling anything when `interval` is `Off`.
    /// The first pass runs as soon as one is due according to the state's
    /// last successful sync. Must be called from within a Tokio runtime.
    pub fn start(&self, interval: SyncInterval) -> Option<SyncHandle> {
        let Some(period) = interval.period() else {
            info!("Periodic sync is off, nothing scheduled");
            return None;
        };

        *self.backoff.lock() = Some(Backoff {
            base: period,
            current: period,
        });

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let first_delay = self.first_delay(interval);

        tokio::spawn(self.clone().run(interval, first_delay, shutdown_rx));

        Some(SyncHandle {
            shutdown_tx,
            interval,
        })
    }

    /// Runs the scheduler loop.
    async fn run(
        self,
        interval: SyncInterval,
        first_delay: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        info!(
            "Starting periodic sync of {} every {} hours, first pass in {:?}",
            self.task.name(),
            interval.hours(),
            first_delay
        );

        let mut delay = first_delay;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    self.run_once().await;
                    delay = self.current_period().unwrap_or(first_delay);
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        info!("Periodic sync scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }

    fn first_delay(&self, interval: SyncInterval) -> Duration {
        let now = Utc::now();
        self.state
            .next_sync(interval, now)
            .and_then(|next| (next - now).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }

    /// Performs a single gated pass.
    ///
    /// Offline wakes never start the task and do not count as failures.
    pub async fn run_once(&self) -> SyncOutcome {
        if !self.gate.is_connected() {
            debug!("Offline, skipping {} sync", self.task.name());
            self.state.record_skipped_offline();
            return SyncOutcome::SkippedOffline;
        }

        let Ok(_running) = self.running.try_lock() else {
            debug!("A {} sync is already running", self.task.name());
            return SyncOutcome::Failed(SyncError::Busy);
        };

        debug!("Starting {} sync", self.task.name());

        let result = match tokio::time::timeout(self.config.sync_timeout, self.task.run()).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout {
                seconds: self.config.sync_timeout.as_secs(),
            }),
        };

        match result {
            Ok(report) => {
                self.state.record_success(report.items);
                self.reset_backoff();
                info!("{} sync finished, {} items", self.task.name(), report.items);
                SyncOutcome::Completed(report)
            },
            Err(e) => {
                self.state.record_failure(e.to_string());
                self.increase_backoff();
                warn!("{} sync failed: {}", self.task.name(), e);
                SyncOutcome::Failed(e)
            },
        }
    }

    /// Resets the wake period to the base interval.
    fn reset_backoff(&self) {
        if let Some(backoff) = self.backoff.lock().as_mut() {
            backoff.current = backoff.base;
        }
    }

    /// Stretches the wake period after repeated failures.
    fn increase_backoff(&self) {
        let failure_count = self.state.failure_count();
        if failure_count < self.config.max_failures {
            return;
        }

        if let Some(backoff) = self.backoff.lock().as_mut() {
            let stretched = Duration::from_secs_f64(
                backoff.current.as_secs_f64() * self.config.backoff_multiplier,
            );
            backoff.current = stretched.min(self.config.max_backoff).max(backoff.base);

            debug!(
                "Increased sync period to {:?} after {} failures",
                backoff.current, failure_count
            );
        }
    }
}

impl std::fmt::Debug for PeriodicSyncScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicSyncScheduler")
            .field("task", &self.task.name())
            .field("gate", &self.gate)
            .field("current_period", &self.current_period())
            .finish()
    }
}
