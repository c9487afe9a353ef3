//! Token values and custom-property alias templates.

use std::fmt;

use crate::error::{Result, TokenError};

use super::TokenGroup;

/// A declared token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A final value: `#FF6F61`, `0.25rem`
    Literal(String),
    /// A value with embedded custom-property references: `hsl(var(--border))`
    Alias(AliasTemplate),
    /// A nested group of variants or sub-tokens
    Group(TokenGroup),
}

impl TokenValue {
    /// Classify a leaf string as a literal or an alias template.
    pub fn leaf(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match AliasTemplate::parse(&value)? {
            Some(template) => Ok(TokenValue::Alias(template)),
            None => Ok(TokenValue::Literal(value)),
        }
    }

    /// Whether this value is a literal or alias rather than a group.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, TokenValue::Group(_))
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenValue::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// One piece of an alias template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text copied through unchanged
    Text(String),
    /// A `var(--name)` reference with optional fallback
    Var {
        property: String,
        fallback: Option<AliasTemplate>,
    },
}

/// A string with one or more `var(--name[, fallback])` references.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTemplate {
    segments: Vec<Segment>,
}

impl AliasTemplate {
    /// Parse a value into a template.
    ///
    /// Returns `Ok(None)` when the value contains no `var(` reference.
    pub fn parse(source: &str) -> Result<Option<Self>> {
        if find_var(source, 0).is_none() {
            return Ok(None);
        }
        parse_template(source).map(Some)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every custom property this template names, fallbacks included.
    pub fn properties(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for segment in &self.segments {
            if let Segment::Var { property, fallback } = segment {
                names.push(property.as_str());
                if let Some(fallback) = fallback {
                    names.extend(fallback.properties());
                }
            }
        }
        names
    }
}

impl fmt::Display for AliasTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => write!(f, "{}", text)?,
                Segment::Var {
                    property,
                    fallback: None,
                } => write!(f, "var({})", property)?,
                Segment::Var {
                    property,
                    fallback: Some(fallback),
                } => write!(f, "var({}, {})", property, fallback)?,
            }
        }
        Ok(())
    }
}

fn parse_template(source: &str) -> Result<AliasTemplate> {
    let mut segments = Vec::new();
    let mut rest = 0;

    while let Some(start) = find_var(source, rest) {
        let open = start + "var(".len();
        let close = find_closing_paren(source, open).ok_or_else(|| TokenError::Parse {
            message: format!("Unclosed var( in '{}'", source),
            help: Some("Every var( needs a matching )".to_string()),
        })?;

        if start > rest {
            segments.push(Segment::Text(source[rest..start].to_string()));
        }

        let inner = &source[open..close];
        let (name, fallback) = match split_top_level_comma(inner) {
            Some(comma) => (&inner[..comma], Some(inner[comma + 1..].trim())),
            None => (inner, None),
        };

        let name = name.trim();
        if !name.starts_with("--") || name.len() == 2 {
            return Err(TokenError::Parse {
                message: format!("Invalid custom property name '{}' in '{}'", name, source),
                help: Some("Custom property names start with --, e.g. var(--primary)".to_string()),
            });
        }

        let fallback = match fallback {
            Some(text) => Some(parse_template(text)?),
            None => None,
        };

        segments.push(Segment::Var {
            property: name.to_string(),
            fallback,
        });
        rest = close + 1;
    }

    if rest < source.len() {
        segments.push(Segment::Text(source[rest..].to_string()));
    }

    Ok(AliasTemplate { segments })
}

/// Find the next `var(` that is not the tail of a longer identifier.
fn find_var(source: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(found) = source[cursor..].find("var(") {
        let start = cursor + found;
        let boundary = source[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '-' || c == '_'));
        if boundary {
            return Some(start);
        }
        cursor = start + "var(".len();
    }
    None
}

/// Index of the `)` closing a paren opened just before `open`.
fn find_closing_paren(source: &str, open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in source.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level_comma(inner: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in inner.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
