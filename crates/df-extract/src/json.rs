//! JSON extractor.

use std::path::Path;

use serde_json::Value;

use crate::error::ExtractError;

/// Extractor for `.json` files. Holds the decoded value unchanged.
#[derive(Debug, Clone)]
pub struct JsonDataExtractor {
    data: Value,
}

impl JsonDataExtractor {
    /// Read and decode the UTF-8 JSON document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::NotFound`/`Io` if the file cannot be read and
    /// `ExtractError::Json` if its content is not a single JSON value.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let source = std::fs::read_to_string(path).map_err(|e| ExtractError::from_io(path, e))?;
        let data: Value = serde_json::from_str(&source).map_err(|source| ExtractError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), kind = kind_of(&data), "parsed JSON document");
        Ok(Self { data })
    }

    #[must_use]
    pub const fn parsed_data(&self) -> &Value {
        &self.data
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
