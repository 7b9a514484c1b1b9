//! `notes://` URI utilities

use crate::error::{Result, StringlyError};
use crate::NOTE_URI_PREFIX;

/// URI template advertised for note resources
pub const NOTE_URI_TEMPLATE: &str = "notes://{noteId}";

/// Build the URI of a note
pub fn note_uri(id: &str) -> String {
    format!("{}{}", NOTE_URI_PREFIX, id)
}

/// Extract the note id from a `notes://<id>` URI.
///
/// `{noteId}` may expand to a comma-separated list; only the first value is
/// used.
pub fn parse_note_uri(uri: &str) -> Result<String> {
    let rest = uri
        .strip_prefix(NOTE_URI_PREFIX)
        .ok_or_else(|| StringlyError::InvalidInput(format!("Not a note URI: {}", uri)))?;

    let id = rest
        .trim_end_matches('/')
        .split(',')
        .next()
        .unwrap_or_default()
        .trim();

    if id.is_empty() {
        return Err(StringlyError::InvalidInput(format!(
            "Missing note id in URI: {}",
            uri
        )));
    }

    Ok(id.to_string())
}
