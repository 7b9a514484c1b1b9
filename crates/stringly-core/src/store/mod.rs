//! File-backed document store
//!
//! One pretty-printed JSON file per document, named `<id>.json`, in a single
//! directory. No cache is kept: every call goes to disk.

mod document;
mod documents;

pub use document::Document;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Suffix of every document file
pub const DOCUMENT_SUFFIX: &str = ".json";

/// Handle to a directory of JSON documents
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store, creating the directory if it does not exist
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            tracing::debug!("Created data directory {}", dir.display());
        }
        Ok(Self { dir })
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the default data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join(crate::DATA_DIR_NAME).join("data"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
