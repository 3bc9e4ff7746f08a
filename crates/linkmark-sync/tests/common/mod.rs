//! Shared fixtures for sync integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use linkmark_core::{
    BookmarkError, InMemoryPreferenceStore, NoteDto, NoteListDto, Result, UserPreferences,
};
use linkmark_sync::{NetworkCapabilities, NetworkHandle, NetworkStateProvider, Transport};
use parking_lot::Mutex;

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn preferences(entries: &[(&str, &str)]) -> UserPreferences {
    UserPreferences::new(Arc::new(InMemoryPreferenceStore::with_values(
        entries.iter().copied(),
    )))
}

/// Network state that tests can flip between online and offline.
#[derive(Default)]
pub struct SwitchableNetwork {
    active: Mutex<Option<NetworkHandle>>,
}

impl SwitchableNetwork {
    pub fn online() -> Arc<Self> {
        let network = Arc::new(Self::default());
        network.go_online();
        network
    }

    pub fn go_online(&self) {
        *self.active.lock() = Some(NetworkHandle::new(2, "wlan0"));
    }

    pub fn go_offline(&self) {
        *self.active.lock() = None;
    }
}

impl NetworkStateProvider for SwitchableNetwork {
    fn active_network(&self) -> Option<NetworkHandle> {
        self.active.lock().clone()
    }

    fn capabilities(&self, _network: &NetworkHandle) -> Option<NetworkCapabilities> {
        Some(NetworkCapabilities::internet(vec![Transport::Wifi]))
    }
}

/// Notes service holding a fixed set of notes.
#[derive(Default)]
pub struct FakeNotesApi {
    notes: HashMap<String, NoteDto>,
}

impl FakeNotesApi {
    pub fn with_note(mut self, id: &str, title: &str, updated_at: &str) -> Self {
        self.notes.insert(
            id.to_string(),
            NoteDto {
                id: id.to_string(),
                title: Some(title.to_string()),
                created_at: Some(updated_at.to_string()),
                updated_at: Some(updated_at.to_string()),
                text: None,
            },
        );
        self
    }
}

#[async_trait]
impl linkmark_sync::NotesApi for FakeNotesApi {
    async fn get_all_notes(&self) -> Result<NoteListDto> {
        let mut notes: Vec<NoteDto> = self.notes.values().cloned().collect();
        notes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(NoteListDto {
            count: Some(notes.len() as u32),
            notes,
        })
    }

    async fn get_note(&self, id: &str) -> Result<NoteDto> {
        self.notes
            .get(id)
            .cloned()
            .ok_or_else(|| BookmarkError::api(404, "not found"))
    }
}
