//! Saved filters.

use async_trait::async_trait;
use linkmark_core::{Result, SavedFilter, SavedFilterRecord};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

/// Create, delete and observe saved filters.
#[async_trait]
pub trait SavedFiltersRepository: Send + Sync {
    /// Subscribes to the current list of saved filters.
    ///
    /// The receiver holds the list at subscription time and is notified
    /// after every mutation. Dropping it unsubscribes.
    fn saved_filters(&self) -> watch::Receiver<Vec<SavedFilter>>;

    /// Saves a filter. Saving an identical filter again has no effect.
    async fn save_filter(&self, filter: &SavedFilter) -> Result<()>;

    /// Deletes the filter that matches exactly. Unknown filters are ignored.
    async fn delete_filter(&self, filter: &SavedFilter) -> Result<()>;
}

/// In-process [`SavedFiltersRepository`].
///
/// Filters are kept in their storage form and listed in insertion order.
#[derive(Debug)]
pub struct InMemorySavedFilters {
    records: Mutex<Vec<SavedFilterRecord>>,
    updates: watch::Sender<Vec<SavedFilter>>,
}

impl InMemorySavedFilters {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a repository holding previously stored records.
    ///
    /// Duplicate records are dropped.
    pub fn with_records(records: Vec<SavedFilterRecord>) -> Self {
        let mut unique: Vec<SavedFilterRecord> = Vec::with_capacity(records.len());
        for record in records {
            if !unique.contains(&record) {
                unique.push(record);
            }
        }

        let (updates, _) = watch::channel(Self::map(&unique));
        Self {
            records: Mutex::new(unique),
            updates,
        }
    }

    /// Returns the current records in storage form.
    pub fn records(&self) -> Vec<SavedFilterRecord> {
        self.records.lock().clone()
    }

    fn map(records: &[SavedFilterRecord]) -> Vec<SavedFilter> {
        records.iter().map(SavedFilter::from).collect()
    }

    fn publish(&self, records: &[SavedFilterRecord]) {
        self.updates.send_replace(Self::map(records));
    }
}

impl Default for InMemorySavedFilters {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SavedFiltersRepository for InMemorySavedFilters {
    fn saved_filters(&self) -> watch::Receiver<Vec<SavedFilter>> {
        self.updates.subscribe()
    }

    async fn save_filter(&self, filter: &SavedFilter) -> Result<()> {
        let record = SavedFilterRecord::from(filter);
        let mut records = self.records.lock();

        if records.contains(&record) {
            debug!("Filter already saved: {:?}", record);
            return Ok(());
        }

        records.push(record);
        self.publish(&records);
        Ok(())
    }

    async fn delete_filter(&self, filter: &SavedFilter) -> Result<()> {
        let record = SavedFilterRecord::from(filter);
        let mut records = self.records.lock();

        let before = records.len();
        records.retain(|existing| existing != &record);

        if records.len() != before {
            self.publish(&records);
        }
        Ok(())
    }
}
