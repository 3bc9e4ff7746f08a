//! User preferences relevant to syncing and display.

mod store;
mod sync_interval;

use std::sync::Arc;

pub use store::{InMemoryPreferenceStore, PreferenceStore};
pub use sync_interval::SyncInterval;

use crate::date::{DateFormatter, PreferredDateFormat};

pub const KEY_PERIODIC_SYNC: &str = "PERIODIC_SYNC";
pub const KEY_PREFERRED_DATE_FORMAT: &str = "PREFERRED_DATE_FORMAT";
pub const KEY_AUTH_TOKEN: &str = "AUTH_TOKEN";

/// Typed access to the preferences stored in a [`PreferenceStore`].
#[derive(Clone)]
pub struct UserPreferences {
    store: Arc<dyn PreferenceStore>,
}

impl UserPreferences {
    /// Creates preferences backed by `store`.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Returns the chosen sync cadence. Missing or unreadable values are `Off`.
    pub fn periodic_sync(&self) -> SyncInterval {
        SyncInterval::resolve(self.store.get(KEY_PERIODIC_SYNC).as_deref())
    }

    /// Persists the sync cadence.
    pub fn set_periodic_sync(&self, interval: SyncInterval) {
        self.store.put(KEY_PERIODIC_SYNC, interval.key().to_string());
    }

    /// Returns the display format for timestamps.
    pub fn preferred_date_format(&self) -> PreferredDateFormat {
        PreferredDateFormat::from_key(self.store.get(KEY_PREFERRED_DATE_FORMAT).as_deref())
    }

    /// Persists the display format for timestamps.
    pub fn set_preferred_date_format(&self, format: PreferredDateFormat) {
        self.store
            .put(KEY_PREFERRED_DATE_FORMAT, format.key().to_string());
    }

    /// Returns a formatter for the current display format.
    pub fn date_formatter(&self) -> DateFormatter {
        DateFormatter::new(self.preferred_date_format())
    }

    /// Returns the API token, if one was saved.
    pub fn auth_token(&self) -> Option<String> {
        self.store
            .get(KEY_AUTH_TOKEN)
            .filter(|token| !token.trim().is_empty())
    }

    /// Saves the API token.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.store.put(KEY_AUTH_TOKEN, token.into());
    }

    /// Forgets the API token.
    pub fn clear_auth_token(&self) {
        self.store.remove(KEY_AUTH_TOKEN);
    }

    /// Returns true if a non-blank API token is saved.
    pub fn has_auth_token(&self) -> bool {
        self.auth_token().is_some()
    }
}

impl std::fmt::Debug for UserPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPreferences")
            .field("periodic_sync", &self.periodic_sync())
            .field("preferred_date_format", &self.preferred_date_format())
            .field("has_auth_token", &self.has_auth_token())
            .finish()
    }
}
