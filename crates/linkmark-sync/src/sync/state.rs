//! Sync state tracking.

use chrono::{DateTime, Utc};
use linkmark_core::SyncInterval;
use parking_lot::RwLock;

/// Tracks the outcome of recent sync passes.
#[derive(Debug, Default)]
pub struct SyncState {
    /// When the last successful pass finished.
    last_sync: RwLock<Option<DateTime<Utc>>>,
    /// Items handled by the last successful pass.
    last_item_count: RwLock<usize>,
    /// The last error message, if any.
    last_error: RwLock<Option<String>>,
    /// Number of consecutive failures.
    failure_count: RwLock<u32>,
    /// Number of passes skipped because the device was offline.
    skipped_offline: RwLock<u32>,
}

impl SyncState {
    /// Creates an empty SyncState.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns when the last successful pass finished.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.read()
    }

    /// Returns the item count of the last successful pass.
    pub fn last_item_count(&self) -> usize {
        *self.last_item_count.read()
    }

    /// Records a successful pass finishing now.
    pub fn record_success(&self, items: usize) {
        self.record_success_at(items, Utc::now());
    }

    /// Records a successful pass finishing at `at`.
    pub fn record_success_at(&self, items: usize, at: DateTime<Utc>) {
        let mut last_sync = self.last_sync.write();
        let mut last_item_count = self.last_item_count.write();
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();

        *last_sync = Some(at);
        *last_item_count = items;
        *last_error = None;
        *failure_count = 0;
    }

    /// Records a failed pass.
    pub fn record_failure(&self, error: impl Into<String>) {
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();

        *last_error = Some(error.into());
        *failure_count += 1;
    }

    /// Records a pass skipped because the device was offline.
    pub fn record_skipped_offline(&self) {
        *self.skipped_offline.write() += 1;
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Returns the number of consecutive failures.
    pub fn failure_count(&self) -> u32 {
        *self.failure_count.read()
    }

    /// Returns how many passes were skipped while offline.
    pub fn skipped_offline_count(&self) -> u32 {
        *self.skipped_offline.read()
    }

    /// Returns true if at least one pass has succeeded.
    pub fn has_synced(&self) -> bool {
        self.last_sync.read().is_some()
    }

    /// Returns true if the last pass did not fail.
    pub fn is_healthy(&self) -> bool {
        self.last_error.read().is_none()
    }

    /// Returns when the next pass is due, or `None` if sync is off.
    ///
    /// Before the first successful pass the next run is due immediately,
    /// which is reported as `now`.
    pub fn next_sync(&self, interval: SyncInterval, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !interval.is_enabled() {
            return None;
        }

        match self.last_sync() {
            Some(last) => interval.next_run_after(last),
            None => Some(now),
        }
    }

    /// Returns true if a pass is due at `now` for the given interval.
    pub fn needs_sync(&self, interval: SyncInterval, now: DateTime<Utc>) -> bool {
        self.next_sync(interval, now).is_some_and(|next| next <= now)
    }

    /// Resets all state.
    pub fn reset(&self) {
        let mut last_sync = self.last_sync.write();
        let mut last_item_count = self.last_item_count.write();
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();
        let mut skipped_offline = self.skipped_offline.write();

        *last_sync = None;
        *last_item_count = 0;
        *last_error = None;
        *failure_count = 0;
        *skipped_offline = 0;
    }
}
