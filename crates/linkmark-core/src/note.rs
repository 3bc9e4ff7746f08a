//! Notes fetched from the bookmarking service.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::DateFormatter;

/// A note as presented to the user.
///
/// Notes are read-only on the client. Timestamps are already in the
/// user's display format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub text: String,
}

/// A note as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDto {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Payload of the "list all notes" endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteListDto {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub notes: Vec<NoteDto>,
}

impl NoteDto {
    /// Maps the wire form into a [`Note`], formatting timestamps for display.
    ///
    /// Missing fields become empty strings. A timestamp that cannot be
    /// parsed is kept verbatim.
    pub fn into_note(self, formatter: &DateFormatter) -> Note {
        let NoteDto {
            id,
            title,
            created_at,
            updated_at,
            text,
        } = self;

        let display = |value: Option<String>| -> String {
            match value {
                Some(raw) => formatter.notes_format_to_display(&raw).unwrap_or_else(|e| {
                    warn!(note_id = %id, "Keeping raw timestamp: {}", e);
                    raw
                }),
                None => String::new(),
            }
        };

        let created_at = display(created_at);
        let updated_at = display(updated_at);

        Note {
            id,
            title: title.unwrap_or_default(),
            created_at,
            updated_at,
            text: text.unwrap_or_default(),
        }
    }
}

impl NoteListDto {
    /// Maps every note in the payload.
    pub fn into_notes(self, formatter: &DateFormatter) -> Vec<Note> {
        self.notes
            .into_iter()
            .map(|dto| dto.into_note(formatter))
            .collect()
    }
}
