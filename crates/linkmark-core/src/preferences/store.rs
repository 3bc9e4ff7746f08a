//! Key/value storage behind user preferences.

use std::collections::HashMap;

use parking_lot::RwLock;

/// A string key/value store holding user preferences.
///
/// Platform integrations back this with their native settings storage.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: String);

    /// Removes `key` from the store.
    fn remove(&self, key: &str);
}

/// In-process preference store.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with the given entries.
    pub fn with_values<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let store = InMemoryPreferenceStore::new();
        assert!(store.get("a").is_none());

        store.put("a", "1".to_string());
        assert_eq!(store.get("a").as_deref(), Some("1"));

        store.put("a", "2".to_string());
        assert_eq!(store.get("a").as_deref(), Some("2"));

        store.remove("a");
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_with_values() {
        let store = InMemoryPreferenceStore::with_values([("k", "v")]);
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
