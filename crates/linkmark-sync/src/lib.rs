//! # Linkmark Sync
//!
//! Background synchronization for the Linkmark bookmark client.
//!
//! This crate decides when a sync pass may run and runs it: it maps the
//! user's periodic sync preference onto a Tokio schedule, gates every pass
//! on network reachability, and wraps remote calls with throttling and
//! retries.
//!
//! ## Features
//!
//! - Connectivity gate over an injectable platform network query
//! - Periodic scheduler with failure backoff and offline skips
//! - Notes and saved-filter repositories
//! - Configuration from files and `LINKMARK_*` environment variables
//!
//! ## Example
//!
//! ```ignore
//! use linkmark_sync::{
//!     ApiRateLimitRunner, ConnectivityGate, HostNetworkState, NotesDataSource, NotesSyncTask,
//!     PeriodicSyncScheduler, SyncConfig, SyncManager, SyncState,
//! };
//!
//! let config = SyncConfig::load(None)?;
//! let runner = Arc::new(ApiRateLimitRunner::from_config(&config));
//! let notes = NotesDataSource::from_config(api, runner, preferences.clone(), &config);
//! let task = Arc::new(NotesSyncTask::new(Arc::new(notes), preferences.clone()));
//!
//! let gate = ConnectivityGate::with_provider(Arc::new(HostNetworkState::new()));
//! let scheduler = PeriodicSyncScheduler::new(task, Arc::new(SyncState::new()), gate, config);
//! let manager = SyncManager::new(scheduler);
//!
//! manager.apply_preferences(&preferences, false);
//! ```

pub mod config;
pub mod connectivity;
pub mod error;
pub mod network;
pub mod repository;
pub mod sync;

// Re-exports
pub use config::SyncConfig;
pub use connectivity::{
    ConnectivityGate, HostNetworkState, NetworkCapabilities, NetworkHandle, NetworkStateProvider,
    Transport,
};
pub use error::SyncError;
pub use network::{ApiRateLimitRunner, RateLimitRunner, RetryPolicy, Transient, retry_io};
pub use repository::{
    InMemorySavedFilters, NotesApi, NotesDataSource, NotesRepository, SavedFiltersRepository,
};
pub use sync::{
    NotesSyncTask, PeriodicSyncScheduler, SyncHandle, SyncManager, SyncOutcome, SyncReport,
    SyncState, SyncTask,
};

// Re-export linkmark_core for consumers
pub use linkmark_core;
