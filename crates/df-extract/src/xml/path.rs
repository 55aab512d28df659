//! ElementTree-style element path queries.
//!
//! Supported syntax:
//! - `tag`, `*`, `.` steps separated by `/`
//! - `//` selects every element beneath the current one at any depth
//! - predicates `[@attr]`, `[@attr='v']`, `[tag]`, `[tag='v']` and `[n]`
//!   (1-based, counted among matches under the same parent)
//!
//! `[tag='v']` compares against the child's full untrimmed text content.
//! Each step yields its matches in document order.

use std::collections::HashSet;
use std::ptr;

use super::tree::XmlElement;
use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Named(String),
}

impl NameTest {
    fn matches(&self, element: &XmlElement) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => element.name() == name.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals(String, String),
    HasChild(String),
    ChildTextEquals(String, String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    predicates: Vec<Predicate>,
}

impl Step {
    /// Push the children of `parent` selected by this step onto `out`.
    fn select_children<'a>(&self, parent: &'a XmlElement, out: &mut Vec<&'a XmlElement>) {
        let mut candidates: Vec<&XmlElement> = parent
            .children()
            .iter()
            .filter(|child| self.test.matches(child))
            .collect();

        for predicate in &self.predicates {
            candidates = match predicate {
                Predicate::Position(n) => candidates.get(n - 1).copied().into_iter().collect(),
                Predicate::HasAttribute(attr) => candidates
                    .into_iter()
                    .filter(|c| c.attr(attr).is_some())
                    .collect(),
                Predicate::AttributeEquals(attr, value) => candidates
                    .into_iter()
                    .filter(|c| c.attr(attr) == Some(value.as_str()))
                    .collect(),
                Predicate::HasChild(name) => candidates
                    .into_iter()
                    .filter(|c| c.child(name).is_some())
                    .collect(),
                Predicate::ChildTextEquals(name, value) => candidates
                    .into_iter()
                    .filter(|c| {
                        c.children_named(name)
                            .any(|grandchild| grandchild.content() == value.as_str())
                    })
                    .collect(),
            };
        }

        out.extend(candidates);
    }

    /// Push every element beneath `context` selected by this step, in pre-order.
    fn select_descendants<'a>(&self, context: &'a XmlElement, out: &mut Vec<&'a XmlElement>) {
        let mut matched = Vec::new();
        self.select_children(context, &mut matched);
        for parent in context.descendants() {
            self.select_children(parent, &mut matched);
        }

        let matched: HashSet<*const XmlElement> = matched.into_iter().map(ptr::from_ref).collect();
        out.extend(
            context
                .descendants()
                .filter(|element| matched.contains(&ptr::from_ref(*element))),
        );
    }
}

/// A compiled element path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    steps: Vec<Step>,
}

impl ElementPath {
    /// Compile `expr`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPath` describing the first syntax problem.
    pub fn parse(expr: &str) -> Result<Self, ExtractError> {
        let invalid = |reason: String| ExtractError::InvalidPath {
            expr: expr.to_string(),
            reason,
        };

        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(invalid("expression is empty".into()));
        }
        if trimmed.starts_with('/') {
            return Err(invalid("absolute paths are not supported".into()));
        }

        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        for segment in split_segments(trimmed).map_err(invalid)? {
            match segment {
                "" if axis == Axis::Descendant => return Err(invalid("empty step".into())),
                "" => axis = Axis::Descendant,
                "." if axis == Axis::Descendant => {
                    return Err(invalid("'.' cannot follow '//'".into()));
                }
                "." => {}
                _ => {
                    steps.push(parse_step(segment, axis).map_err(invalid)?);
                    axis = Axis::Child;
                }
            }
        }
        if axis == Axis::Descendant {
            return Err(invalid("path ends with '/'".into()));
        }

        Ok(Self { steps })
    }

    /// Evaluate against `context`. Matches are unique and in selection order.
    #[must_use]
    pub fn select<'a>(&self, context: &'a XmlElement) -> Vec<&'a XmlElement> {
        let mut current = vec![context];

        for step in &self.steps {
            let mut next = Vec::new();
            for &node in &current {
                match step.axis {
                    Axis::Child => step.select_children(node, &mut next),
                    Axis::Descendant => step.select_descendants(node, &mut next),
                }
            }

            let mut seen = HashSet::new();
            next.retain(|element| seen.insert(ptr::from_ref::<XmlElement>(element)));
            current = next;
        }

        current
    }
}

/// Split on `/` outside of brackets and quoted literals.
fn split_segments(expr: &str) -> Result<Vec<&str>, String> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, ch) in expr.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if depth > 0 => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ']'".to_string())?;
            }
            (None, '/') if depth == 0 => {
                segments.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err("unterminated string literal".into());
    }
    if depth != 0 {
        return Err("unterminated '['".into());
    }
    segments.push(&expr[start..]);
    Ok(segments)
}

fn parse_step(segment: &str, axis: Axis) -> Result<Step, String> {
    let (name, mut rest) = segment
        .find('[')
        .map_or((segment, ""), |i| (&segment[..i], &segment[i..]));

    let test = match name {
        "*" => NameTest::Any,
        "" => return Err(format!("missing element name in '{segment}'")),
        _ if is_valid_name(name) => NameTest::Named(name.to_string()),
        _ => return Err(format!("invalid element name '{name}'")),
    };

    let mut predicates = Vec::new();
    while !rest.is_empty() {
        let close = closing_bracket(rest).ok_or_else(|| "unterminated '['".to_string())?;
        predicates.push(parse_predicate(&rest[1..close])?);
        rest = &rest[close + 1..];
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(format!("unexpected '{rest}' after predicate"));
        }
    }

    Ok(Step {
        axis,
        test,
        predicates,
    })
}

/// Index of the `]` closing the predicate that `rest` opens with.
fn closing_bracket(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in rest.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_predicate(body: &str) -> Result<Predicate, String> {
    let body = body.trim();
    if body.is_empty() {
        return Err("empty predicate".into());
    }

    if let Ok(position) = body.parse::<usize>() {
        if position == 0 {
            return Err("positions start at 1".into());
        }
        return Ok(Predicate::Position(position));
    }

    let (lhs, value) = match body.split_once('=') {
        Some((lhs, rhs)) => (lhs.trim(), Some(parse_literal(rhs.trim())?)),
        None => (body, None),
    };

    if let Some(attr) = lhs.strip_prefix('@') {
        if !is_valid_name(attr) {
            return Err(format!("invalid attribute name '{attr}'"));
        }
        return Ok(match value {
            Some(value) => Predicate::AttributeEquals(attr.to_string(), value),
            None => Predicate::HasAttribute(attr.to_string()),
        });
    }

    if !is_valid_name(lhs) {
        return Err(format!("unsupported predicate '[{body}]'"));
    }
    Ok(match value {
        Some(value) => Predicate::ChildTextEquals(lhs.to_string(), value),
        None => Predicate::HasChild(lhs.to_string()),
    })
}

fn parse_literal(raw: &str) -> Result<String, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('\'' | '"')), Some(close)) if open == close => {
            Ok(chars.as_str().to_string())
        }
        _ => Err(format!("expected a quoted literal, found '{raw}'")),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
