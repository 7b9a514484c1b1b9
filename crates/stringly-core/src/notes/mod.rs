//! Notes: documents with `content` and `updated_at`
//!
//! A note is an ordinary document in the store. `NoteStore` writes the fixed
//! `{id, content, updated_at}` shape and reads any document back as a
//! [`NoteState`], which carries the read-only `status` field.

pub mod uri;

use crate::error::Result;
use crate::store::{Document, Store};
use chrono::{DateTime, SecondsFormat, Utc};

/// Value of the synthesized `status` field
pub const NOTE_STATUS_AVAILABLE: &str = "available";

/// A note as written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    /// `updated_at` in ISO-8601 with millisecond precision
    pub fn updated_at_string(&self) -> String {
        format_timestamp(&self.updated_at)
    }
}

impl From<Note> for Document {
    fn from(note: Note) -> Self {
        let updated_at = note.updated_at_string();
        Document::new(note.id)
            .with_field("content", note.content)
            .with_field("updated_at", updated_at)
    }
}

/// Read view of a stored note, never written back
#[derive(Debug, Clone, PartialEq)]
pub struct NoteState {
    pub document: Document,
}

impl NoteState {
    pub fn id(&self) -> &str {
        &self.document.id
    }

    /// Stored `status` if the document has one, otherwise `available`
    pub fn status(&self) -> &str {
        self.document
            .get_str("status")
            .unwrap_or(NOTE_STATUS_AVAILABLE)
    }

    pub fn content(&self) -> &str {
        self.document.get_str("content").unwrap_or_default()
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.document.get_str("updated_at")
    }
}

/// Notes projection over a [`Store`]
#[derive(Debug, Clone)]
pub struct NoteStore {
    store: Store,
}

impl NoteStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Ids of every document in the store
    pub fn list_ids(&self) -> Result<Vec<String>> {
        self.store.list_ids()
    }

    /// Stored note plus the synthesized `status`
    pub fn get_state(&self, id: &str) -> Result<NoteState> {
        let document = self.store.get(id)?;
        Ok(NoteState { document })
    }

    /// Note content, or an empty string when the document has none
    pub fn get_content(&self, id: &str) -> Result<String> {
        Ok(self.get_state(id)?.content().to_string())
    }

    /// Overwrite the note with fresh content and timestamp
    pub fn save(&self, id: &str, content: &str) -> Result<Note> {
        let note = Note::new(id, content);
        self.store.save(note.clone().into())?;
        tracing::debug!("Saved note {}", id);
        Ok(note)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
