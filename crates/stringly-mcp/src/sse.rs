//! MCP over Server-Sent Events
//!
//! `GET /sse` opens a push channel and announces where the client should post
//! its messages. `POST /sse/messages?sessionId=...` dispatches one JSON-RPC
//! message and pushes the response down the matching channel.

use crate::protocol::JsonRpcRequest;
use crate::server::McpServer;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dashmap::DashMap;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const SSE_PATH: &str = "/sse";
pub const MESSAGES_PATH: &str = "/sse/messages";

/// Why a message could not be delivered to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    UnknownSession,
    ChannelClosed,
}

/// Open push channels, keyed by session id
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, UnboundedSender<String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session with a fresh id
    pub fn open(&self) -> Session {
        let id = uuid::Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.sessions.insert(id.clone(), sender);
        Session {
            id,
            receiver,
            registry: self.clone(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Queue a payload on a session's channel
    pub fn send(&self, id: &str, payload: String) -> Result<(), SendError> {
        let sender = self
            .sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(SendError::UnknownSession)?;

        sender.send(payload).map_err(|_| {
            self.remove(id);
            SendError::ChannelClosed
        })
    }
}

/// Receiving end of one session. Dropping it closes the session.
#[derive(Debug)]
pub struct Session {
    id: String,
    receiver: UnboundedReceiver<String>,
    registry: SessionRegistry,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.registry.remove(&self.id) {
            tracing::info!("SSE session closed: {}", self.id);
            if self.registry.is_empty() {
                tracing::debug!("No open SSE sessions");
            }
        }
    }
}

/// SSE transport state: the dispatcher plus its open sessions
#[derive(Debug, Clone)]
pub struct SseTransport {
    server: McpServer,
    sessions: SessionRegistry,
}

impl SseTransport {
    pub fn new(server: McpServer) -> Self {
        Self {
            server,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Routes for `/sse` and `/sse/messages`
    pub fn router(&self) -> Router {
        Router::new()
            .route(SSE_PATH, get(open_session))
            .route(MESSAGES_PATH, post(post_message))
            .with_state(self.clone())
    }
}

// GET /sse
async fn open_session(
    State(transport): State<SseTransport>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session = transport.sessions().open();
    let endpoint = format!("{}?sessionId={}", MESSAGES_PATH, session.id());
    tracing::info!(
        "New SSE session established: {} ({} open)",
        session.id(),
        transport.sessions().len()
    );

    let announce = stream::once(async move {
        Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint))
    });

    let messages = stream::unfold(session, |mut session| async move {
        let payload = session.recv().await?;
        Some((Ok(Event::default().event("message").data(payload)), session))
    });

    Sse::new(announce.chain(messages)).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

// POST /sse/messages?sessionId=...
async fn post_message(
    State(transport): State<SseTransport>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing sessionId parameter").into_response();
    };

    if !transport.sessions().contains(&session_id) {
        tracing::warn!("No active transport for session {}", session_id);
        return no_session(&session_id);
    }

    tracing::debug!("Received message for sessionId {}", session_id);

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid message: {}", e)).into_response()
        }
    };

    if let Some(response) = transport.server.handle_request(&request).await {
        let payload = match serde_json::to_string(&response) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Error in message route for session {}: {}", session_id, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response();
            }
        };

        if let Err(e) = transport.sessions().send(&session_id, payload) {
            tracing::warn!("Dropping response for session {}: {:?}", session_id, e);
            return no_session(&session_id);
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

fn no_session(session_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("No active session: {}", session_id),
    )
        .into_response()
}
