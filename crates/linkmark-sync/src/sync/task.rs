//! Work performed by one sync pass.

use std::sync::Arc;

use async_trait::async_trait;
use linkmark_core::{Note, UserPreferences};
use tokio::sync::watch;
use tracing::debug;

use crate::error::SyncError;
use crate::repository::NotesRepository;

/// Summary of a finished sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of items fetched or pushed.
    pub items: usize,
}

impl SyncReport {
    pub fn new(items: usize) -> Self {
        Self { items }
    }
}

/// One pass of synchronization with the remote service.
#[async_trait]
pub trait SyncTask: Send + Sync {
    /// Runs a single pass.
    async fn run(&self) -> Result<SyncReport, SyncError>;

    /// Returns the name of this task, used for logging.
    fn name(&self) -> &str;
}

/// Refreshes the local snapshot of the user's notes.
///
/// Without saved credentials there is nothing to sync and the pass
/// finishes successfully with zero items.
pub struct NotesSyncTask {
    repository: Arc<dyn NotesRepository>,
    preferences: UserPreferences,
    snapshot: watch::Sender<Vec<Note>>,
}

impl NotesSyncTask {
    /// Creates a task syncing through `repository`.
    pub fn new(repository: Arc<dyn NotesRepository>, preferences: UserPreferences) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self {
            repository,
            preferences,
            snapshot,
        }
    }

    /// Subscribes to the notes fetched by the latest successful pass.
    pub fn notes(&self) -> watch::Receiver<Vec<Note>> {
        self.snapshot.subscribe()
    }
}

#[async_trait]
impl SyncTask for NotesSyncTask {
    async fn run(&self) -> Result<SyncReport, SyncError> {
        if !self.preferences.has_auth_token() {
            debug!("No credentials saved, nothing to sync");
            return Ok(SyncReport::default());
        }

        let notes = self.repository.get_all_notes().await?;
        let report = SyncReport::new(notes.len());
        self.snapshot.send_replace(notes);

        Ok(report)
    }

    fn name(&self) -> &str {
        "notes"
    }
}

impl std::fmt::Debug for NotesSyncTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesSyncTask")
            .field("preferences", &self.preferences)
            .finish()
    }
}
