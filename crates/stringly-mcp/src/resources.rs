//! MCP resource handlers

use crate::protocol::{ResourceContent, ResourceDefinition, ResourceMetadata, ResourceTemplate};
use chrono::{SecondsFormat, Utc};
use stringly_core::notes::uri::{note_uri, parse_note_uri, NOTE_URI_TEMPLATE};
use stringly_core::{NoteState, NoteStore, Result};

const NOTE_MIME_TYPE: &str = "text/plain";

/// List every readable note as a resource.
///
/// Note states are fetched concurrently; notes that fail to load are left out.
pub async fn list_resources(notes: &NoteStore) -> Result<Vec<ResourceDefinition>> {
    let ids = notes.list_ids()?;

    let fetches = ids.into_iter().map(|id| {
        let notes = notes.clone();
        tokio::task::spawn_blocking(move || notes.get_state(&id))
    });

    let resources = futures::future::join_all(fetches)
        .await
        .into_iter()
        .filter_map(|joined| match joined {
            Ok(Ok(state)) => {
                tracing::debug!("Listing note {} ({})", state.id(), state.status());
                Some(to_resource(&state))
            }
            Ok(Err(e)) => {
                tracing::debug!("Skipping note in listing: {}", e);
                None
            }
            Err(e) => {
                tracing::error!("Note fetch task failed: {}", e);
                None
            }
        })
        .collect();

    Ok(resources)
}

fn to_resource(state: &NoteState) -> ResourceDefinition {
    let updated_at = state
        .updated_at()
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    ResourceDefinition {
        uri: note_uri(state.id()),
        name: format!("Note: {}", state.id()),
        mime_type: NOTE_MIME_TYPE.to_string(),
        metadata: ResourceMetadata { updated_at },
    }
}

/// Templates for addressing individual notes
pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: NOTE_URI_TEMPLATE.to_string(),
        name: "note".to_string(),
        description: Some("A stored note, addressed by id".to_string()),
        mime_type: NOTE_MIME_TYPE.to_string(),
    }]
}

/// Read a note by URI.
///
/// A missing or empty note is not an error: the returned text says it was
/// not found. Only a URI that does not name a note fails.
pub async fn read_resource(notes: &NoteStore, uri: &str) -> Result<ResourceContent> {
    let id = parse_note_uri(uri)?;

    let text = match notes.get_content(&id) {
        Ok(content) if !content.is_empty() => content,
        Ok(_) => format!("Note {} not found", id),
        Err(e) if e.is_not_found() => format!("Note {} not found", id),
        Err(e) => {
            tracing::error!("Error reading note content {}: {}", id, e);
            format!("Note {} not found", id)
        }
    };

    Ok(ResourceContent {
        uri: uri.to_string(),
        mime_type: NOTE_MIME_TYPE.to_string(),
        text,
    })
}
