//! Owned element tree produced by the XML extractor.

use serde::Serialize;

use super::path::ElementPath;
use crate::error::ExtractError;

/// A single attribute, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct XmlAttribute {
    name: String,
    value: String,
}

/// An element with its attributes, leading text and child elements.
///
/// `text` is the trimmed text that appears before the first child element.
/// `content` is every character of text inside the element, untrimmed and in
/// document order, including the text of descendants and text between children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<XmlAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<XmlElement>,
    #[serde(skip)]
    content: String,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            content: String::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// All text inside the element, untrimmed, descendants included.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Direct children called `name`, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Self> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All elements beneath this one, depth-first in document order.
    pub fn descendants(&self) -> impl Iterator<Item = &Self> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Every element matched by the element path `expr`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` if `expr` cannot be parsed.
    pub fn find_all(&self, expr: &str) -> Result<Vec<&Self>, ExtractError> {
        Ok(ElementPath::parse(expr)?.select(self))
    }

    /// First element matched by `expr`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` if `expr` cannot be parsed.
    pub fn find(&self, expr: &str) -> Result<Option<&Self>, ExtractError> {
        Ok(self.find_all(expr)?.into_iter().next())
    }

    /// Text of the first element matched by `expr`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` if `expr` cannot be parsed.
    pub fn find_text(&self, expr: &str) -> Result<Option<&str>, ExtractError> {
        Ok(self.find(expr)?.and_then(Self::text))
    }

    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push(XmlAttribute { name, value });
    }

    pub(crate) fn push_child(&mut self, child: Self) {
        self.content.push_str(&child.content);
        self.children.push(child);
    }

    /// Append character data. Only text preceding the first child becomes `text`.
    pub(crate) fn append_text(&mut self, chunk: &str) {
        self.content.push_str(chunk);
        if self.children.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(chunk);
        }
    }

    /// Trim accumulated text once the element is closed.
    pub(crate) fn finish(&mut self) {
        if let Some(text) = self.text.take() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                self.text = Some(trimmed.to_string());
            }
        }
    }
}

struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    #[must_use]
    pub const fn new(root: XmlElement) -> Self {
        Self { root }
    }

    #[must_use]
    pub const fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Evaluate `expr` relative to the root element.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` if `expr` cannot be parsed.
    pub fn find_all(&self, expr: &str) -> Result<Vec<&XmlElement>, ExtractError> {
        self.root.find_all(expr)
    }

    /// First match of `expr` relative to the root element.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` if `expr` cannot be parsed.
    pub fn find(&self, expr: &str) -> Result<Option<&XmlElement>, ExtractError> {
        self.root.find(expr)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(name: &str, text: &str) -> XmlElement {
        let mut el = XmlElement::new(name);
        el.append_text(text);
        el.finish();
        el
    }

    fn sample() -> XmlElement {
        let mut a = XmlElement::new("a");
        a.push_child(leaf("b", "1"));
        let mut c = XmlElement::new("c");
        c.push_child(leaf("d", "2"));
        a.push_child(c);
        a.push_child(leaf("b", "3"));
        a
    }

    #[test]
    fn descendants_are_preorder() {
        let root = sample();
        let names: Vec<&str> = root.descendants().map(XmlElement::name).collect();
        assert_eq!(names, vec!["b", "c", "d", "b"]);
    }

    #[test]
    fn children_named_keeps_document_order() {
        let root = sample();
        let texts: Vec<_> = root.children_named("b").filter_map(XmlElement::text).collect();
        assert_eq!(texts, vec!["1", "3"]);
    }

    #[test]
    fn text_after_first_child_is_dropped() {
        let mut el = XmlElement::new("p");
        el.append_text("  lead ");
        el.push_child(XmlElement::new("br"));
        el.append_text("tail");
        el.finish();
        assert_eq!(el.text(), Some("lead"));
    }

    #[test]
    fn content_keeps_all_text_untrimmed() {
        let mut el = XmlElement::new("p");
        el.append_text(" lead ");
        el.push_child(leaf("b", " bold "));
        el.append_text("tail");
        el.finish();
        assert_eq!(el.content(), " lead  bold tail");
        assert_eq!(el.children()[0].content(), " bold ");
    }

    #[test]
    fn child_lookup_with_borrowed_name() {
        let root = sample();
        let wanted = String::from("c");
        let found = root.child(&wanted).map(XmlElement::name);
        drop(wanted);
        assert_eq!(found, Some("c"));
        assert!(root.child("missing").is_none());
    }

    #[test]
    fn whitespace_only_text_becomes_none() {
        let mut el = XmlElement::new("p");
        el.append_text("\n    ");
        el.finish();
        assert_eq!(el.text(), None);
    }

    #[test]
    fn attr_lookup() {
        let mut el = XmlElement::new("phoneNumber");
        el.push_attribute("type".into(), "home".into());
        assert_eq!(el.attr("type"), Some("home"));
        assert_eq!(el.attr("missing"), None);
    }
}
