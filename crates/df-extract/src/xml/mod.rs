//! XML extractor: loads a well-formed document into an owned element tree.

mod path;
mod tree;

use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

pub use path::ElementPath;
pub use tree::{XmlDocument, XmlElement};

use crate::error::ExtractError;

/// Extractor for `.xml` files.
#[derive(Debug, Clone)]
pub struct XmlDataExtractor {
    tree: XmlDocument,
}

impl XmlDataExtractor {
    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::NotFound`/`Io` if the file cannot be read and
    /// `ExtractError::Xml` if it is not well-formed.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let source = std::fs::read_to_string(path).map_err(|e| ExtractError::from_io(path, e))?;
        let tree = parse_document(&source).map_err(|message| ExtractError::Xml {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(
            path = %path.display(),
            root = tree.root().name(),
            elements = tree.root().descendants().count() + 1,
            "parsed XML document"
        );
        Ok(Self { tree })
    }

    #[must_use]
    pub const fn parsed_data(&self) -> &XmlDocument {
        &self.tree
    }
}

/// Parse `source` into a document with exactly one root element.
///
/// # Errors
///
/// Returns a human-readable message on malformed input.
pub fn parse_document(source: &str) -> Result<XmlDocument, String> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} (at byte {})", reader.error_position()))?;

        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err("more than one root element".into());
                }
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let mut element = open_element(&start)?;
                element.finish();
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| "closing tag without a matching start tag".to_string())?;
                element.finish();
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text).map_err(|e| e.to_string())?;
                let decoded = unescape(raw).map_err(|e| e.to_string())?;
                append_text(&mut stack, &decoded)?;
            }
            Event::CData(data) => {
                let raw = std::str::from_utf8(&data).map_err(|e| e.to_string())?;
                append_text(&mut stack, raw)?;
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference).map_err(|e| e.to_string())?;
                let entity = format!("&{name};");
                let resolved = unescape(&entity).map_err(|e| e.to_string())?;
                append_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name()));
    }
    root.map(XmlDocument::new)
        .ok_or_else(|| "document has no root element".to_string())
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref()).map_err(|e| e.to_string())?;
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|e| e.to_string())?;
        let raw = std::str::from_utf8(&attr.value).map_err(|e| e.to_string())?;
        let value = unescape(raw).map_err(|e| e.to_string())?;
        element.push_attribute(key.to_string(), value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        Ok(())
    } else if root.is_some() {
        Err("more than one root element".into())
    } else {
        *root = Some(element);
        Ok(())
    }
}

fn append_text(stack: &mut [XmlElement], chunk: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(current) => {
            current.append_text(chunk);
            Ok(())
        }
        None if chunk.trim().is_empty() => Ok(()),
        None => Err(format!("text outside the root element: '{}'", chunk.trim())),
    }
}
