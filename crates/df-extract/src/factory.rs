//! Extension-based dispatch to the extractor variants.

use std::io::Write;
use std::path::Path;

use crate::document::Extractor;
use crate::error::ExtractError;
use crate::format::{DataFormat, detect_format};
use crate::json::JsonDataExtractor;
use crate::sql::SqlDataExtractor;
use crate::xml::XmlDataExtractor;

/// Construct the fully loaded extractor matching the extension of `path`.
///
/// # Errors
///
/// Returns `ExtractError::UnsupportedFormat` for an unknown extension, or the
/// selected extractor's own error.
pub async fn dataextraction_factory(path: impl AsRef<Path>) -> Result<Extractor, ExtractError> {
    let path = path.as_ref();
    let format = detect_format(path).ok_or_else(|| ExtractError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    tracing::debug!(path = %path.display(), %format, "dispatching extractor");

    Ok(match format {
        DataFormat::Json => Extractor::Json(JsonDataExtractor::open(path)?),
        DataFormat::Xml => Extractor::Xml(XmlDataExtractor::open(path)?),
        DataFormat::Sqlite => Extractor::Sqlite(SqlDataExtractor::open(path).await?),
    })
}

/// Like [`dataextraction_factory`], but an unsupported format is reported as
/// one diagnostic line on `out` and yields `Ok(None)`.
///
/// # Errors
///
/// Propagates every error other than `UnsupportedFormat`, including failures
/// to write the diagnostic.
pub async fn extract_data_from(
    path: impl AsRef<Path>,
    out: &mut impl Write,
) -> Result<Option<Extractor>, ExtractError> {
    let path = path.as_ref();
    match dataextraction_factory(path).await {
        Ok(extractor) => Ok(Some(extractor)),
        Err(err @ ExtractError::UnsupportedFormat { .. }) => {
            writeln!(out, "{err}").map_err(|e| ExtractError::from_io(path, e))?;
            tracing::warn!(path = %path.display(), "no extractor for this file type");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
