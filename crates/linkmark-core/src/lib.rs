//! Linkmark Core - Domain types and preferences
//!
//! This crate provides the foundational types shared by every Linkmark
//! component: tags, saved filters, notes, the periodic sync cadence and
//! the error type returned by repositories.

pub mod date;
pub mod error;
pub mod filter;
pub mod note;
pub mod preferences;
pub mod types;

pub use date::{DateFormatter, PreferredDateFormat};
pub use error::{BookmarkError, Result};
pub use filter::{SavedFilter, SavedFilterRecord};
pub use note::{Note, NoteDto, NoteListDto};
pub use preferences::{InMemoryPreferenceStore, PreferenceStore, SyncInterval, UserPreferences};
pub use types::Tag;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
