//! Theme declaration parser.
//!
//! Reads a YAML (or JSON) document shaped like a styling-tool config:
//!
//! ```yaml
//! theme:
//!   colors:
//!     spark: { DEFAULT: "#FF6F61", hover: "#FF857A" }
//!   keyframes: { ... }
//!   animation: { ... }
//!   extend: { ... }
//! plugins: [tailwindcss-animate]
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TokenError};
use crate::types::{DeclarationTree, TokenGroup, TokenValue};

use super::motion::{parse_animations, parse_keyframes};
use super::scalar::{key, mapping, parse_yaml, scalar};

const KEYFRAMES_KEY: &str = "keyframes";
const ANIMATION_KEY: &str = "animation";
const EXTEND_KEY: &str = "extend";

/// Parse a theme declaration document.
pub fn parse_declarations(source: &str) -> Result<DeclarationTree> {
    let root = parse_yaml(source, "theme declarations")?;
    let root = mapping(&root, "The theme document")?;

    let mut tree = DeclarationTree::new();
    let Some(root) = root else {
        return Ok(tree);
    };

    for (k, value) in root {
        let name = key(k, "the theme document")?;
        match name.as_str() {
            "theme" => parse_theme(value, &mut tree)?,
            "plugins" => tree.plugins = parse_plugins(value)?,
            other => tracing::debug!(key = other, "ignoring top-level key"),
        }
    }

    Ok(tree)
}

fn parse_theme(value: &Value, tree: &mut DeclarationTree) -> Result<()> {
    let Some(theme) = mapping(value, "theme")? else {
        return Ok(());
    };

    let mut extension: Option<&Value> = None;

    for (k, value) in theme {
        let name = key(k, "theme")?;
        match name.as_str() {
            KEYFRAMES_KEY => {
                for keyframes in parse_keyframes(value)? {
                    tree.add_keyframes(keyframes);
                }
            }
            ANIMATION_KEY => {
                for binding in parse_animations(value)? {
                    tree.add_animation(binding);
                }
            }
            EXTEND_KEY => extension = Some(value),
            _ => {
                let token = parse_value(value, &name)?;
                tree.add_category(name, token)?;
            }
        }
    }

    if let Some(extension) = extension {
        apply_extension(extension, tree)?;
    }

    Ok(())
}

/// Merge `theme.extend` over the base theme.
fn apply_extension(value: &Value, tree: &mut DeclarationTree) -> Result<()> {
    let Some(extend) = mapping(value, "theme.extend")? else {
        return Ok(());
    };

    let mut categories = TokenGroup::new();
    for (k, value) in extend {
        let name = key(k, "theme.extend")?;
        match name.as_str() {
            KEYFRAMES_KEY => {
                for keyframes in parse_keyframes(value)? {
                    tree.add_keyframes(keyframes);
                }
            }
            ANIMATION_KEY => {
                for binding in parse_animations(value)? {
                    tree.add_animation(binding);
                }
            }
            _ => {
                let token = parse_value(value, &name)?;
                categories.insert(name, token)?;
            }
        }
    }

    tree.tokens.extend_with(categories);
    Ok(())
}

/// Parse a token value at `path`: a scalar leaf or a nested group.
fn parse_value(value: &Value, path: &str) -> Result<TokenValue> {
    match value {
        Value::Mapping(map) => parse_group(map, path).map(TokenValue::Group),
        Value::Sequence(items) => {
            // Font stacks and similar lists become one comma-joined value
            let parts = items
                .iter()
                .map(|item| scalar(item).ok_or_else(|| nested_list_error(path)))
                .collect::<Result<Vec<_>>>()?;
            TokenValue::leaf(parts.join(", "))
        }
        other => match scalar(other) {
            Some(text) => TokenValue::leaf(text),
            None => Err(TokenError::Parse {
                message: format!("Token '{}' has no value", path),
                help: Some("Give the token a string value or remove it".to_string()),
            }),
        },
    }
}

fn parse_group(map: &Mapping, path: &str) -> Result<TokenGroup> {
    let mut group = TokenGroup::new();
    for (k, value) in map {
        let name = key(k, path)?;
        let child_path = format!("{}.{}", path, name);
        if group.contains(&name) {
            return Err(TokenError::DuplicateKey { path: child_path });
        }
        let token = parse_value(value, &child_path)?;
        group.insert(name, token)?;
    }
    Ok(group)
}

fn parse_plugins(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                scalar(item).ok_or_else(|| TokenError::Parse {
                    message: "Plugin entries must be identifiers".to_string(),
                    help: Some("List plugins by name, e.g. plugins: [tailwindcss-animate]".to_string()),
                })
            })
            .collect(),
        other => scalar(other).map(|s| vec![s]).ok_or_else(|| TokenError::Parse {
            message: "plugins must be a list".to_string(),
            help: None,
        }),
    }
}

fn nested_list_error(path: &str) -> TokenError {
    TokenError::Parse {
        message: format!("Token '{}' contains a nested list", path),
        help: Some("List items must be plain strings".to_string()),
    }
}
