//! Ownership of the single running sync schedule.

use chrono::{DateTime, Utc};
use linkmark_core::{SyncInterval, UserPreferences};
use parking_lot::Mutex;
use tracing::info;

use super::{PeriodicSyncScheduler, SyncHandle, SyncOutcome};
use crate::error::SyncError;

/// Keeps at most one periodic schedule alive.
pub struct SyncManager {
    scheduler: PeriodicSyncScheduler,
    active: Mutex<Option<SyncHandle>>,
}

impl SyncManager {
    /// Creates a manager with no schedule running.
    pub fn new(scheduler: PeriodicSyncScheduler) -> Self {
        Self {
            scheduler,
            active: Mutex::new(None),
        }
    }

    /// Returns the underlying scheduler.
    pub fn scheduler(&self) -> &PeriodicSyncScheduler {
        &self.scheduler
    }

    /// Schedules periodic sync at `interval`.
    ///
    /// `Off` cancels whatever is running. Otherwise an existing schedule is
    /// kept as is unless `replace` is set, in which case it is stopped and a
    /// new one started. Must be called from within a Tokio runtime.
    pub fn enqueue(&self, interval: SyncInterval, replace: bool) {
        let mut active = self.active.lock();

        if !interval.is_enabled() {
            if let Some(handle) = active.take() {
                info!("Cancelling periodic sync every {} hours", handle.interval().hours());
            }
            self.scheduler.clear_schedule();
            return;
        }

        if let Some(handle) = active.as_ref()
            && !replace
        {
            info!(
                "Keeping existing periodic sync every {} hours",
                handle.interval().hours()
            );
            return;
        }

        // Dropping the previous handle stops its loop.
        *active = self.scheduler.start(interval);
    }

    /// Schedules according to the stored preference.
    pub fn apply_preferences(&self, preferences: &UserPreferences, replace: bool) {
        self.enqueue(preferences.periodic_sync(), replace);
    }

    /// Returns the cadence of the running schedule, if any.
    pub fn current_interval(&self) -> Option<SyncInterval> {
        self.active.lock().as_ref().map(SyncHandle::interval)
    }

    /// Returns true if a schedule is running.
    pub fn is_scheduled(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Returns when the running schedule is next due.
    ///
    /// Fails with [`SyncError::Disabled`] when nothing is scheduled.
    pub fn next_sync(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, SyncError> {
        let interval = self.current_interval().ok_or(SyncError::Disabled)?;
        self.scheduler
            .state()
            .next_sync(interval, now)
            .ok_or(SyncError::Disabled)
    }

    /// Stops the running schedule, if any.
    pub fn cancel(&self) {
        self.enqueue(SyncInterval::Off, true);
    }

    /// Runs one gated pass right away, outside the schedule.
    pub async fn sync_now(&self) -> SyncOutcome {
        self.scheduler.run_once().await
    }
}

impl std::fmt::Debug for SyncManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncManager")
            .field("scheduler", &self.scheduler)
            .field("current_interval", &self.current_interval())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::ConnectivityGate;
    use crate::sync::{SyncReport, SyncState, SyncTask};
    use async_trait::async_trait;
    use linkmark_core::InMemoryPreferenceStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingTask {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl SyncTask for CountingTask {
        async fn run(&self) -> Result<SyncReport, SyncError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(SyncReport::new(0))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn manager() -> SyncManager {
        let scheduler = PeriodicSyncScheduler::with_defaults(
            Arc::new(CountingTask::default()),
            Arc::new(SyncState::new()),
            ConnectivityGate::unavailable(),
        );
        SyncManager::new(scheduler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_off_cancels_schedule() {
        let manager = manager();

        manager.enqueue(SyncInterval::Every6Hours, false);
        assert!(manager.is_scheduled());

        manager.enqueue(SyncInterval::Off, false);
        assert!(!manager.is_scheduled());
        assert_eq!(manager.current_interval(), None);
        assert!(matches!(
            manager.next_sync(chrono::Utc::now()),
            Err(SyncError::Disabled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_leaves_existing_schedule() {
        let manager = manager();

        manager.enqueue(SyncInterval::Every6Hours, false);
        manager.enqueue(SyncInterval::Every24Hours, false);

        assert_eq!(manager.current_interval(), Some(SyncInterval::Every6Hours));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_swaps_schedule() {
        let manager = manager();

        manager.enqueue(SyncInterval::Every6Hours, false);
        manager.enqueue(SyncInterval::Every24Hours, true);

        assert_eq!(manager.current_interval(), Some(SyncInterval::Every24Hours));
        assert_eq!(
            manager.scheduler().current_period(),
            Some(Duration::from_secs(24 * 3600))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_preferences() {
        let manager = manager();
        let preferences = UserPreferences::new(Arc::new(InMemoryPreferenceStore::new()));

        manager.apply_preferences(&preferences, false);
        assert!(!manager.is_scheduled());

        preferences.set_periodic_sync(SyncInterval::Every12Hours);
        manager.apply_preferences(&preferences, true);
        assert_eq!(manager.current_interval(), Some(SyncInterval::Every12Hours));

        manager.cancel();
        assert!(!manager.is_scheduled());
        assert_eq!(manager.scheduler().current_period(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_reported_period() {
        let manager = manager();

        manager.enqueue(SyncInterval::Every6Hours, false);
        assert_eq!(
            manager.scheduler().current_period(),
            Some(Duration::from_secs(6 * 3600))
        );

        manager.cancel();
        assert!(!manager.is_scheduled());
        assert_eq!(manager.scheduler().current_period(), None);

        manager.enqueue(SyncInterval::Every12Hours, false);
        manager.enqueue(SyncInterval::Off, false);
        assert_eq!(manager.scheduler().current_period(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_sync_follows_last_success() {
        let manager = manager();
        let synced_at = chrono::Utc::now();
        manager.scheduler().state().record_success_at(3, synced_at);

        manager.enqueue(SyncInterval::Every24Hours, false);

        assert_eq!(
            manager.next_sync(synced_at).unwrap(),
            synced_at + chrono::TimeDelta::hours(24)
        );
    }

    #[tokio::test]
    async fn test_sync_now_respects_gate() {
        let manager = manager();

        let outcome = manager.sync_now().await;

        assert!(matches!(outcome, SyncOutcome::SkippedOffline));
        assert_eq!(manager.scheduler().state().skipped_offline_count(), 1);
    }
}
