//! Helpers for reading YAML values.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TokenError};

/// Stringify a scalar key or value. Numbers and booleans are accepted
/// because YAML writes `spacing: {1: 0.25rem}` and `opacity: 0.5` unquoted.
pub(crate) fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar(&tagged.value),
        _ => None,
    }
}

/// Read a mapping key as a string.
pub(crate) fn key(value: &Value, context: &str) -> Result<String> {
    scalar(value).ok_or_else(|| TokenError::Parse {
        message: format!("Keys in {} must be strings or numbers", context),
        help: None,
    })
}

/// Require a mapping (an absent or `null` value counts as empty).
pub(crate) fn mapping<'a>(value: &'a Value, context: &str) -> Result<Option<&'a Mapping>> {
    match value {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(TokenError::Parse {
            message: format!("{} must be a mapping", context),
            help: Some("Use key: value pairs".to_string()),
        }),
    }
}

/// Parse YAML source, naming the document kind in errors.
pub(crate) fn parse_yaml(source: &str, what: &str) -> Result<Value> {
    serde_yaml::from_str(source).map_err(|e| TokenError::Parse {
        message: format!("Invalid YAML in {}: {}", what, e),
        help: Some("Keys must be unique within one mapping".to_string()),
    })
}
