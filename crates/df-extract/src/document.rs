//! The common accessor shared by every extractor variant.

use serde::Serialize;
use serde_json::Value;

use crate::format::DataFormat;
use crate::json::JsonDataExtractor;
use crate::sql::{SqlDataExtractor, TableRows};
use crate::xml::{XmlDataExtractor, XmlDocument};

/// Borrowed view of an extractor's parsed result. Callers match on the variant.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ParsedData<'a> {
    Json(&'a Value),
    Xml(&'a XmlDocument),
    Table(&'a TableRows),
}

impl ParsedData<'_> {
    #[must_use]
    pub const fn format(&self) -> DataFormat {
        match self {
            Self::Json(_) => DataFormat::Json,
            Self::Xml(_) => DataFormat::Xml,
            Self::Table(_) => DataFormat::Sqlite,
        }
    }
}

/// Read-only access to a fully loaded document.
pub trait DataExtractor {
    fn parsed_data(&self) -> ParsedData<'_>;

    fn format(&self) -> DataFormat {
        self.parsed_data().format()
    }
}

impl DataExtractor for JsonDataExtractor {
    fn parsed_data(&self) -> ParsedData<'_> {
        ParsedData::Json(Self::parsed_data(self))
    }
}

impl DataExtractor for XmlDataExtractor {
    fn parsed_data(&self) -> ParsedData<'_> {
        ParsedData::Xml(Self::parsed_data(self))
    }
}

impl DataExtractor for SqlDataExtractor {
    fn parsed_data(&self) -> ParsedData<'_> {
        ParsedData::Table(Self::parsed_data(self))
    }
}

/// A constructed extractor, one variant per supported format.
#[derive(Debug, Clone)]
pub enum Extractor {
    Json(JsonDataExtractor),
    Xml(XmlDataExtractor),
    Sqlite(SqlDataExtractor),
}

impl DataExtractor for Extractor {
    fn parsed_data(&self) -> ParsedData<'_> {
        match self {
            Self::Json(inner) => DataExtractor::parsed_data(inner),
            Self::Xml(inner) => DataExtractor::parsed_data(inner),
            Self::Sqlite(inner) => DataExtractor::parsed_data(inner),
        }
    }
}
