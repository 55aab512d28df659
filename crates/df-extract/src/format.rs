//! Format detection from file extensions.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// The document formats an extractor exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    Json,
    Xml,
    Sqlite,
}

impl DataFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the document format from a file path extension.
///
/// Matching is case-sensitive. Returns `None` for unsupported or missing
/// extensions.
#[must_use]
pub fn detect_format(file_path: &Path) -> Option<DataFormat> {
    match file_path.extension()?.to_str()? {
        "json" => Some(DataFormat::Json),
        "xml" => Some(DataFormat::Xml),
        "db" => Some(DataFormat::Sqlite),
        _ => None,
    }
}
