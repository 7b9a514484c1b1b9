//! Stringly Core Library
//!
//! File-backed JSON document store behind the Stringly Typed Store server.
//!
//! # Features
//! - One pretty-printed JSON file per document, named `<id>.json`
//! - Notes projection with a read-only `status` field
//! - `notes://` URIs for exposing notes as MCP resources
//! - Layered configuration (defaults, YAML file, environment)

pub mod config;
pub mod error;
pub mod notes;
pub mod store;

pub use config::{Config, RunMode};
pub use error::{Error, Result, StringlyError};
pub use notes::{Note, NoteState, NoteStore, NOTE_STATUS_AVAILABLE};
pub use store::{Document, Store, DOCUMENT_SUFFIX};

/// URI prefix for note resources
pub const NOTE_URI_PREFIX: &str = "notes://";

/// Default data directory name
pub const DATA_DIR_NAME: &str = "stringly";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "stringly";
