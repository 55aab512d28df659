//! # df-extract
//!
//! Extension-dispatched document extractors for datafactory.
//!
//! Three formats are supported, chosen by file extension:
//! - `.json`: decoded into a [`serde_json::Value`]
//! - `.xml`: parsed into an owned [`XmlDocument`] with element path queries
//! - `.db`: a SQLite database; the `genres` table is fetched into [`TableRows`]
//!
//! [`dataextraction_factory`] returns a typed [`Extractor`]; callers read it
//! through [`DataExtractor::parsed_data`] and match on [`ParsedData`].

pub mod document;
pub mod error;
pub mod factory;
pub mod format;
pub mod json;
pub mod sql;
pub mod xml;

pub use document::{DataExtractor, Extractor, ParsedData};
pub use error::ExtractError;
pub use factory::{dataextraction_factory, extract_data_from};
pub use format::{DataFormat, detect_format};
pub use json::JsonDataExtractor;
pub use sql::{CellValue, GENRES_QUERY, SqlDataExtractor, TableRow, TableRows};
pub use xml::{ElementPath, XmlDataExtractor, XmlDocument, XmlElement};
