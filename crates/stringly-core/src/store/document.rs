//! Stored document type

use crate::error::{Result, StringlyError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object keyed by its `id`.
///
/// Everything other than `id` is kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field. Setting `id` changes the document id instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if key == "id" {
            if let Value::String(id) = value {
                self.id = id;
            }
            return;
        }
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of a field, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Build a document from a JSON object under an explicit id.
    ///
    /// Any `id` inside the object is discarded.
    pub fn with_id(id: impl Into<String>, mut object: Map<String, Value>) -> Self {
        object.retain(|key, _| key != "id");
        Self {
            id: id.into(),
            fields: object,
        }
    }

    /// Parse file contents stored under `file_id`.
    ///
    /// A stored object without a string `id` takes the id of its file.
    pub(crate) fn from_stored(file_id: &str, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| StringlyError::Parse(format!("{}.json: {}", file_id, e)))?;

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(StringlyError::Parse(format!(
                    "{}.json: expected a JSON object, found {}",
                    file_id,
                    json_type_name(&other)
                )))
            }
        };

        let id = match object.get("id") {
            Some(Value::String(id)) => id.clone(),
            _ => file_id.to_string(),
        };
        object.retain(|key, _| key != "id");

        Ok(Self { id, fields: object })
    }

    /// JSON object with `id` first, then the fields in their stored order
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert("id".to_string(), Value::String(self.id.clone()));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
