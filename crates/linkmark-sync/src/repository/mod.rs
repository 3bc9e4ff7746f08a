//! Repository contracts and their data sources.
//!
//! Every operation reports expected failures through
//! [`linkmark_core::Result`] instead of panicking.

mod filters;
mod notes;

pub use filters::{InMemorySavedFilters, SavedFiltersRepository};
pub use notes::{NotesApi, NotesDataSource, NotesRepository};
