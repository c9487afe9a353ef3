//! Depth-first flattening of token groups into dotted paths.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{Result, TokenError};
use crate::types::{TokenGroup, TokenValue};

/// Flatten a group into `path -> leaf` pairs.
///
/// A group with a `DEFAULT` leaf is also addressable by its own path, so
/// `spark` and `spark.DEFAULT` both map to the same leaf.
pub(crate) fn flatten(root: &TokenGroup) -> Result<BTreeMap<String, &TokenValue>> {
    let mut leaves = BTreeMap::new();
    walk(root, "", &mut leaves)?;
    Ok(leaves)
}

fn walk<'a>(
    group: &'a TokenGroup,
    prefix: &str,
    leaves: &mut BTreeMap<String, &'a TokenValue>,
) -> Result<()> {
    for (key, value) in group.entries() {
        let path = join(prefix, key);

        match value {
            TokenValue::Group(child) => {
                if let Some(default) = child.default_value().filter(|v| v.is_leaf()) {
                    insert(leaves, path.clone(), default)?;
                }
                walk(child, &path, leaves)?;
            }
            leaf => insert(leaves, path, leaf)?,
        }
    }
    Ok(())
}

fn insert<'a>(
    leaves: &mut BTreeMap<String, &'a TokenValue>,
    path: String,
    value: &'a TokenValue,
) -> Result<()> {
    match leaves.entry(path) {
        Entry::Occupied(entry) => Err(TokenError::DuplicateKey {
            path: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
