//! Stringly MCP Server
//!
//! Model Context Protocol server exposing stored notes as `notes://`
//! resources and a `createNote` tool, over stdio or Server-Sent Events.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod sse;
pub mod tools;

pub use server::{start_server, McpServer};
pub use sse::{SessionRegistry, SseTransport};
