//! Custom-property table parser.
//!
//! Two shapes are accepted. The structured form:
//!
//! ```yaml
//! base:
//!   --radius: 0.5rem
//! modes:
//!   dark:
//!     --border: 217.2 32.6% 17.5%
//! ```
//!
//! and a flat mapping of property names, which is read as the base set.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TokenError};
use crate::types::CustomPropertyTable;

use super::scalar::{key, mapping, parse_yaml, scalar};

/// Parse a custom-property document.
pub fn parse_properties(source: &str) -> Result<CustomPropertyTable> {
    let root = parse_yaml(source, "custom properties")?;
    let mut table = CustomPropertyTable::new();

    let Some(root) = mapping(&root, "The property document")? else {
        return Ok(table);
    };

    if !is_structured(root) {
        read_set(root, "properties", |name, value| table.insert(name, value))?;
        return Ok(table);
    }

    for (k, value) in root {
        match key(k, "the property document")?.as_str() {
            "base" => {
                if let Some(base) = mapping(value, "base")? {
                    read_set(base, "base", |name, value| table.insert(name, value))?;
                }
            }
            "modes" => {
                let Some(modes) = mapping(value, "modes")? else {
                    continue;
                };
                for (mode_key, overrides) in modes {
                    let mode = key(mode_key, "modes")?;
                    let context = format!("modes.{}", mode);
                    table.add_mode(mode.clone());
                    if let Some(overrides) = mapping(overrides, &context)? {
                        read_set(overrides, &context, |name, value| {
                            table.insert_mode(mode.clone(), name, value)
                        })?;
                    }
                }
            }
            other => {
                return Err(TokenError::Parse {
                    message: format!("Unknown section '{}' in the property document", other),
                    help: Some("Use `base:` and `modes:`, or a flat list of --properties".to_string()),
                })
            }
        }
    }

    Ok(table)
}

/// A document is structured when it has `base` or `modes` and no `--` names
/// at the top level.
fn is_structured(root: &Mapping) -> bool {
    let keys: Vec<String> = root.keys().filter_map(scalar).collect();
    keys.iter().any(|k| k == "base" || k == "modes") && !keys.iter().any(|k| k.starts_with("--"))
}

fn read_set(map: &Mapping, context: &str, mut insert: impl FnMut(String, String)) -> Result<()> {
    for (k, value) in map {
        let name = key(k, context)?;
        let value = scalar(value).ok_or_else(|| TokenError::Parse {
            message: format!("Property '{}' in {} must be a plain value", name, context),
            help: Some("Quote values that contain `:` or `#`".to_string()),
        })?;
        insert(name, value);
    }
    Ok(())
}
