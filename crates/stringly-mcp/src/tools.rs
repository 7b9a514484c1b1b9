//! MCP tool definitions and handlers

use crate::protocol::*;
use anyhow::Result;
use serde_json::Value;
use stringly_core::NoteStore;

pub const CREATE_NOTE_TOOL: &str = "createNote";

pub fn create_note_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: CREATE_NOTE_TOOL.to_string(),
        description: "Create or update a note".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "ID of the note to create or update"
                },
                "content": {
                    "type": "string",
                    "description": "Content of the note"
                }
            },
            "required": ["id", "content"]
        }),
    }
}

/// Save a note. Failures come back as an `isError` result, never as `Err`.
pub async fn handle_create_note(notes: &NoteStore, args: Value) -> Result<ToolResult> {
    match create_note(notes, &args) {
        Ok(result) => Ok(result),
        Err(e) => {
            tracing::warn!("createNote failed: {}", e);
            Ok(ToolResult::error(format!("Error saving note: {}", e)))
        }
    }
}

fn create_note(notes: &NoteStore, args: &Value) -> Result<ToolResult> {
    let id = args
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing id"))?;

    let content = args
        .get("content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing content"))?;

    let note = notes.save(id, content)?;

    let mut result = ToolResult::text(format!("Note {} saved successfully.", note.id));
    result.structured_content = Some(serde_json::json!({
        "id": note.id,
        "updated_at": note.updated_at_string(),
    }));
    Ok(result)
}
