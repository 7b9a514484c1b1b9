//! MCP server implementation

use crate::protocol::*;
use crate::{resources, tools};
use anyhow::Result;
use stringly_core::{NoteStore, StringlyError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

pub const SERVER_NAME: &str = "stringlytyped-store";

/// JSON-RPC dispatcher shared by the stdio and SSE transports
#[derive(Debug, Clone)]
pub struct McpServer {
    notes: NoteStore,
}

impl McpServer {
    pub fn new(notes: NoteStore) -> Self {
        Self { notes }
    }

    /// Serve newline-delimited JSON-RPC over stdin/stdout
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let mut reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(trimmed).await {
                self.write_response(&mut writer, &response).await?;
            }
        }

        Ok(())
    }

    async fn write_response<W: AsyncWriteExt + Unpin>(
        &self,
        writer: &mut W,
        response: &JsonRpcResponse,
    ) -> Result<()> {
        let json = serde_json::to_string(response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Parse and dispatch one raw message
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle_request(&request).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                PARSE_ERROR,
                &format!("Parse error: {}", e),
            )),
        }
    }

    /// Dispatch a request. Notifications get no response.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("MCP notification: {}", request.method);
            return None;
        }
        tracing::debug!("MCP request: {}", request.method);

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id.clone(), serde_json::json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => self.handle_resources_list(request).await,
            "resources/templates/list" => self.handle_resource_templates_list(request),
            "resources/read" => self.handle_resources_read(request).await,
            "prompts/list" => self.handle_prompts_list(request),
            _ => JsonRpcResponse::error(
                request.id.clone(),
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let result = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": { "subscribe": false, "listChanged": false },
                "prompts": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        JsonRpcResponse::success(request.id.clone(), result)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![tools::create_note_tool_definition()];
        JsonRpcResponse::success(request.id.clone(), serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let name = request
            .params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let arguments = request
            .params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let result = match name {
            tools::CREATE_NOTE_TOOL => tools::handle_create_note(&self.notes, arguments).await,
            _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
        };

        let tool_result = result.unwrap_or_else(|e| ToolResult::error(format!("Error: {}", e)));
        JsonRpcResponse::from_serializable(request.id.clone(), &tool_result)
    }

    async fn handle_resources_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let resources = match resources::list_resources(&self.notes).await {
            Ok(resources) => resources,
            Err(e) => {
                tracing::error!("Error reading notes directory: {}", e);
                Vec::new()
            }
        };
        JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({ "resources": resources }),
        )
    }

    fn handle_resource_templates_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({ "resourceTemplates": resources::resource_templates() }),
        )
    }

    async fn handle_resources_read(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(uri) = request.params.get("uri").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, "Missing uri");
        };

        match resources::read_resource(&self.notes, uri).await {
            Ok(content) => JsonRpcResponse::success(
                request.id.clone(),
                serde_json::json!({ "contents": [content] }),
            ),
            Err(StringlyError::InvalidInput(msg)) => {
                JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, &msg)
            }
            Err(e) => JsonRpcResponse::error(request.id.clone(), INTERNAL_ERROR, &e.to_string()),
        }
    }

    fn handle_prompts_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), serde_json::json!({ "prompts": [] }))
    }
}

/// Serve the MCP protocol over stdio
pub async fn start_server(notes: NoteStore) -> Result<()> {
    let server = McpServer::new(notes);
    server.run().await
}
