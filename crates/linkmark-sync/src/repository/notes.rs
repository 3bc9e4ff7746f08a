//! Remote notes.

use std::sync::Arc;

use async_trait::async_trait;
use linkmark_core::{BookmarkError, Note, NoteDto, NoteListDto, Result, UserPreferences};
use tracing::debug;

use crate::config::SyncConfig;
use crate::network::{ApiRateLimitRunner, RateLimitRunner, RetryPolicy, retry_io};

/// Read-only access to the user's notes.
#[async_trait]
pub trait NotesRepository: Send + Sync {
    /// Fetches every note.
    async fn get_all_notes(&self) -> Result<Vec<Note>>;

    /// Fetches a single note.
    ///
    /// # Errors
    ///
    /// - `BookmarkError::NoteNotFound` if no note has this id
    /// - `BookmarkError::Unreachable` if the service cannot be reached
    async fn get_note(&self, id: &str) -> Result<Note>;
}

/// The notes endpoints of the remote service.
///
/// Implemented by the HTTP layer, which lives outside this crate.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn get_all_notes(&self) -> Result<NoteListDto>;

    async fn get_note(&self, id: &str) -> Result<NoteDto>;
}

/// [`NotesRepository`] backed by a [`NotesApi`].
///
/// Calls go through the rate limiter and transient failures are retried.
/// Timestamps are formatted with the user's current date preference.
pub struct NotesDataSource<A, R = ApiRateLimitRunner> {
    api: A,
    runner: Arc<R>,
    preferences: UserPreferences,
    retry: RetryPolicy,
}

impl<A, R> NotesDataSource<A, R>
where
    A: NotesApi,
    R: RateLimitRunner,
{
    /// Creates a data source with the default retry policy.
    pub fn new(api: A, runner: Arc<R>, preferences: UserPreferences) -> Self {
        Self {
            api,
            runner,
            preferences,
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a data source using the configured retry policy.
    pub fn from_config(
        api: A,
        runner: Arc<R>,
        preferences: UserPreferences,
        config: &SyncConfig,
    ) -> Self {
        Self::new(api, runner, preferences).with_retry(config.retry.clone())
    }

    /// Returns the retry policy in use.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Builder-style method to set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl<A, R> NotesRepository for NotesDataSource<A, R>
where
    A: NotesApi,
    R: RateLimitRunner,
{
    async fn get_all_notes(&self) -> Result<Vec<Note>> {
        let api = &self.api;
        let runner = &self.runner;

        let list = retry_io(&self.retry, move || runner.run(move || api.get_all_notes())).await?;
        let notes = list.into_notes(&self.preferences.date_formatter());

        debug!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn get_note(&self, id: &str) -> Result<Note> {
        if id.trim().is_empty() {
            return Err(BookmarkError::validation_error("id", "note id cannot be empty"));
        }

        let api = &self.api;
        let runner = &self.runner;

        let dto = retry_io(&self.retry, move || runner.run(move || api.get_note(id)))
            .await
            .map_err(|e| match e {
                BookmarkError::Api { status: 404, .. } => BookmarkError::note_not_found(id),
                other => other,
            })?;

        debug!("Fetched note {}", dto.id);
        Ok(dto.into_note(&self.preferences.date_formatter()))
    }
}

impl<A, R> std::fmt::Debug for NotesDataSource<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesDataSource")
            .field("retry", &self.retry)
            .finish()
    }
}
