//! Document CRUD operations

use super::{Document, Store, DOCUMENT_SUFFIX};
use crate::error::{Result, StringlyError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Check that an id can be used as a file name inside the store directory
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(StringlyError::InvalidInput(
            "Resource must have an id".to_string(),
        ));
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(StringlyError::InvalidInput(format!(
            "Invalid resource id: {}",
            id
        )));
    }
    Ok(())
}

impl Store {
    fn document_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}{}", id, DOCUMENT_SUFFIX))
    }

    /// File names in the store directory that look like documents
    fn document_files(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!("Error reading data directory {}: {}", self.dir.display(), e);
                return Err(e.into());
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.len() > DOCUMENT_SUFFIX.len() && name.ends_with(DOCUMENT_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Identifiers of all stored documents, derived from file names
    pub fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .document_files()?
            .into_iter()
            .filter_map(|name| name.strip_suffix(DOCUMENT_SUFFIX).map(str::to_string))
            .collect())
    }

    /// All documents that can be read and parsed.
    ///
    /// Unreadable or malformed files are logged and left out.
    pub fn list(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for id in self.list_ids()? {
            match self.read_document(&id) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!("Error reading resource file {}{}: {}", id, DOCUMENT_SUFFIX, e);
                }
            }
        }
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }

    /// Get a document by id
    pub fn get(&self, id: &str) -> Result<Document> {
        if validate_id(id).is_err() {
            return Err(StringlyError::NotFound(id.to_string()));
        }
        self.read_document(id).map_err(|e| {
            match &e {
                StringlyError::NotFound(_) => tracing::debug!("Resource {} not found", id),
                StringlyError::Parse(msg) => tracing::warn!("Error parsing resource {}: {}", id, msg),
                other => tracing::error!("Error reading resource {}: {}", id, other),
            }
            e
        })
    }

    fn read_document(&self, id: &str) -> Result<Document> {
        let path = self.document_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StringlyError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Document::from_stored(id, &raw)
    }

    /// Write a document, replacing any existing file with the same id
    pub fn save(&self, doc: Document) -> Result<Document> {
        validate_id(&doc.id)?;

        let json = serde_json::to_string_pretty(&doc.to_value())?;
        let path = self.document_path(&doc.id);
        if let Err(e) = fs::write(&path, json) {
            tracing::error!("Error saving resource {}: {}", doc.id, e);
            return Err(e.into());
        }

        tracing::debug!("Saved resource {} to {}", doc.id, path.display());
        Ok(doc)
    }

    /// Delete a document. Returns whether a file existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        if validate_id(id).is_err() {
            return Ok(false);
        }

        match fs::remove_file(self.document_path(id)) {
            Ok(()) => {
                tracing::debug!("Deleted resource {}", id);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => {
                tracing::error!("Error deleting resource {}: {}", id, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("data");
        let store = Store::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn test_save_and_get() {
        let (_dir, store) = open_store();

        let doc = Document::new("r1")
            .with_field("value", "a")
            .with_field("nested", json!({"n": [1, 2, 3]}));
        let saved = store.save(doc.clone()).unwrap();
        assert_eq!(saved, doc);

        let loaded = store.get("r1").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let (dir, store) = open_store();
        store.save(Document::new("r1").with_field("value", 1)).unwrap();

        let raw = fs::read_to_string(dir.path().join("r1.json")).unwrap();
        assert!(raw.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"id": "r1", "value": 1}));
    }

    #[test]
    fn test_save_keeps_field_order() {
        let (dir, store) = open_store();
        let body = match json!({"zeta": 1, "id": "r1", "alpha": {"y": 1, "b": 2}, "mid": true}) {
            serde_json::Value::Object(object) => object,
            _ => unreachable!(),
        };
        store.save(Document::with_id("r1", body)).unwrap();

        let raw = fs::read_to_string(dir.path().join("r1.json")).unwrap();
        let id_at = raw.find("\"id\"").unwrap();
        let zeta_at = raw.find("\"zeta\"").unwrap();
        let alpha_at = raw.find("\"alpha\"").unwrap();
        let y_at = raw.find("\"y\"").unwrap();
        let b_at = raw.find("\"b\"").unwrap();
        let mid_at = raw.find("\"mid\"").unwrap();
        assert!(id_at < zeta_at && zeta_at < alpha_at && alpha_at < mid_at);
        assert!(y_at < b_at);

        let keys: Vec<String> = store.get("r1").unwrap().fields.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, store) = open_store();
        store
            .save(Document::new("r1").with_field("a", 1).with_field("b", 2))
            .unwrap();
        store.save(Document::new("r1").with_field("c", 3)).unwrap();

        let loaded = store.get("r1").unwrap();
        assert_eq!(loaded.to_value(), json!({"id": "r1", "c": 3}));
    }

    #[test]
    fn test_save_requires_id() {
        let (_dir, store) = open_store();
        let err = store.save(Document::new("")).unwrap_err();
        assert!(matches!(err, StringlyError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Resource must have an id");
    }

    #[test]
    fn test_save_rejects_path_ids() {
        let (_dir, store) = open_store();
        for id in ["../escape", "a/b", "a\\b", "..", "."] {
            let err = store.save(Document::new(id)).unwrap_err();
            assert!(matches!(err, StringlyError::InvalidInput(_)), "id {:?}", id);
        }
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, store) = open_store();
        let err = store.get("missing").unwrap_err();
        assert!(err.is_not_found());

        let err = store.get("../etc/passwd").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_malformed_is_parse_error() {
        let (dir, store) = open_store();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        let err = store.get("broken").unwrap_err();
        assert!(matches!(err, StringlyError::Parse(_)));
    }

    #[test]
    fn test_delete_reports_existence() {
        let (_dir, store) = open_store();
        store.save(Document::new("r1")).unwrap();

        assert!(store.delete("r1").unwrap());
        assert!(store.get("r1").unwrap_err().is_not_found());

        assert!(!store.delete("r1").unwrap());
        assert!(!store.delete("r1").unwrap());
        assert!(!store.delete("never-existed").unwrap());
    }

    #[test]
    fn test_list_skips_malformed_files() {
        let (dir, store) = open_store();
        store.save(Document::new("a").with_field("v", 1)).unwrap();
        store.save(Document::new("b").with_field("v", 2)).unwrap();
        fs::write(dir.path().join("broken.json"), "not json at all").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = store.list().unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let (dir, store) = open_store();
        fs::remove_dir_all(dir.path()).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(store.list_ids().unwrap().is_empty());
    }

    #[test]
    fn test_list_ids_from_file_names() {
        let (dir, store) = open_store();
        store.save(Document::new("beta")).unwrap();
        fs::write(dir.path().join("alpha.json"), "{ malformed").unwrap();
        fs::create_dir(dir.path().join("dir.json")).unwrap();

        assert_eq!(store.list_ids().unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("resource_1700000000000").is_ok());
        assert!(validate_id("with spaces and.dots").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("a/b").is_err());
    }
}
