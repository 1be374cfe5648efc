//! Decode phase: bytes → untyped JSON document, plus the typed project model.

pub mod types;

pub use types::*;

use serde_json::{Map, Value};

use crate::error::{Diagnostic, ProjectError, Result};

/// A parsed but unvalidated project document. The root is always an object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    root: Map<String, Value>,
}

impl RawDocument {
    /// Decode bytes as UTF-8 (lossily, like a browser `TextDecoder`), trim
    /// and parse as JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        Self::from_text(text.trim())
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ProjectError::Decode { source })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(RawDocument { root }),
            other => Err(ProjectError::Structural(vec![Diagnostic::structure(
                "S002",
                format!("Expected a JSON object, found {}", json_type_name(&other)),
                "",
            )])),
        }
    }

    /// The declared `appVersion`, which must be present and a string.
    pub fn app_version(&self) -> Result<&str> {
        match self.root.get("appVersion") {
            None => Err(ProjectError::MalformedVersion(Diagnostic::version(
                "V001",
                "The appVersion of the project file is missing",
            ))),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(ProjectError::MalformedVersion(Diagnostic::version(
                "V002",
                format!(
                    "The appVersion of the project file should be a string, found {}",
                    json_type_name(other)
                ),
            ))),
        }
    }

    /// Mutable access to `audioItems` when it is an object.
    pub fn audio_items_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root.get_mut("audioItems").and_then(Value::as_object_mut)
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

/// Human-readable JSON type name for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escape one JSON pointer reference token.
pub(crate) fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
