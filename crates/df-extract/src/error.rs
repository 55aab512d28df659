//! Extraction error types for df-extract.

use std::path::PathBuf;

/// Errors that can occur while detecting, loading or querying a document.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No such file: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid XML in {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },

    #[error("{source}")]
    Database {
        path: PathBuf,
        #[source]
        source: libsql::Error,
    },

    #[error("Cannot extract data from {path}")]
    UnsupportedFormat { path: String },

    #[error("Invalid element path '{expr}': {reason}")]
    InvalidPath { expr: String, reason: String },
}

impl ExtractError {
    /// Map a read failure, keeping "file does not exist" as its own kind.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Whether this error came from the database driver.
    #[must_use]
    pub const fn is_database(&self) -> bool {
        matches!(self, Self::Database { .. })
    }
}
