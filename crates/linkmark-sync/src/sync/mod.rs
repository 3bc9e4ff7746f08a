//! Periodic background synchronization.
//!
//! A [`PeriodicSyncScheduler`] wakes on the user's chosen
//! [`SyncInterval`](linkmark_core::SyncInterval), checks the
//! [`ConnectivityGate`](crate::ConnectivityGate) and, when online, runs one
//! [`SyncTask`] pass. [`SyncManager`] owns the running schedule.

mod manager;
mod scheduler;
mod state;
mod task;

pub use manager::SyncManager;
pub use scheduler::{PeriodicSyncScheduler, SyncHandle, SyncOutcome};
pub use state::SyncState;
pub use task::{NotesSyncTask, SyncReport, SyncTask};
