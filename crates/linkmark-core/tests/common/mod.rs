#![allow(dead_code)]
use std::sync::Arc;

use linkmark_core::{InMemoryPreferenceStore, SavedFilter, Tag, UserPreferences};

/// Builds a SavedFilter from a term and tag names.
pub fn filter(term: &str, tags: &[&str]) -> SavedFilter {
    SavedFilter::new(term, tags.iter().copied().map(Tag::from).collect())
}

/// Builds preferences backed by an in-memory store with the given entries.
pub fn preferences(entries: &[(&str, &str)]) -> UserPreferences {
    UserPreferences::new(Arc::new(InMemoryPreferenceStore::with_values(
        entries.iter().copied(),
    )))
}
