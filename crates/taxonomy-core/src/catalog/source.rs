//! Remote category sources
//!
//! A remote source yields raw category documents equivalent to the builtin
//! table rows. The bundled implementation reads a collection export from disk.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{Result, TaxonomyError};

/// Provider of raw category documents
pub trait RemoteSource: Send + Sync {
    /// Name used in logs and observer reports
    fn name(&self) -> &str;

    /// Fetch every document of the collection
    fn fetch(&self) -> Result<Vec<Value>>;
}

/// Collection export stored as JSON.
///
/// Accepts either a top-level array of documents or an object holding them
/// under `documents`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl RemoteSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        if !self.path.exists() {
            return Err(TaxonomyError::SourceNotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        documents_from(value)
    }
}

/// Extract the document list from a parsed collection export
pub fn documents_from(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(docs) => Ok(docs),
        Value::Object(mut map) => match map.remove("documents") {
            Some(Value::Array(docs)) => Ok(docs),
            _ => Err(TaxonomyError::MalformedSource {
                message: "expected a `documents` array".to_string(),
            }),
        },
        other => Err(TaxonomyError::MalformedSource {
            message: format!("expected an array or object, got {}", type_name(&other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
