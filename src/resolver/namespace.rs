//! How brand namespaces interact with legacy tokens in the same category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Policy for a namespace group such as `colors.brillu`.
///
/// The policy is applied per category: `colors.brillu.spark` belongs to
/// namespace `brillu` of category `colors`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum NamespacePolicy {
    /// Namespaced and legacy tokens keep their own paths.
    #[default]
    Coexist,
    /// Namespaced tokens are also exposed without the namespace segment,
    /// replacing legacy tokens at those paths.
    Overlay { namespace: String },
    /// In categories that contain the namespace, only its tokens remain,
    /// hoisted to the category level.
    Exclusive { namespace: String },
}

/// Apply the policy; returns the paths whose legacy values were replaced.
pub(crate) fn apply(
    policy: &NamespacePolicy,
    entries: &mut BTreeMap<String, String>,
) -> Vec<String> {
    match policy {
        NamespacePolicy::Coexist => Vec::new(),
        NamespacePolicy::Overlay { namespace } => overlay(namespace, entries),
        NamespacePolicy::Exclusive { namespace } => {
            exclusive(namespace, entries);
            Vec::new()
        }
    }
}

/// Split `cat.ns.rest` into `(cat, rest)` when the namespace matches.
fn hoist<'a>(path: &'a str, namespace: &str) -> Option<(&'a str, &'a str)> {
    let (category, remainder) = path.split_once('.')?;
    let rest = remainder.strip_prefix(namespace)?.strip_prefix('.')?;
    Some((category, rest))
}

fn overlay(namespace: &str, entries: &mut BTreeMap<String, String>) -> Vec<String> {
    let hoisted: Vec<(String, String)> = entries
        .iter()
        .filter_map(|(path, value)| {
            hoist(path, namespace).map(|(cat, rest)| (format!("{}.{}", cat, rest), value.clone()))
        })
        .collect();

    let mut shadowed = Vec::new();
    for (path, value) in hoisted {
        if let Some(previous) = entries.insert(path.clone(), value) {
            // A namespaced token can collide with another namespaced one
            // only through a dotted key; that is not a legacy shadow.
            if hoist(&path, namespace).is_none() {
                tracing::debug!(path = %path, previous = %previous, "namespace overlay replaced token");
                shadowed.push(path);
            }
        }
    }
    shadowed
}

fn exclusive(namespace: &str, entries: &mut BTreeMap<String, String>) {
    let categories: Vec<String> = entries
        .keys()
        .filter_map(|path| hoist(path, namespace).map(|(cat, _)| cat.to_string()))
        .collect();

    let taken = std::mem::take(entries);
    for (path, value) in taken {
        let category = path.split('.').next().unwrap_or(&path);
        if !categories.iter().any(|c| c == category) {
            entries.insert(path, value);
            continue;
        }
        if let Some((cat, rest)) = hoist(&path, namespace) {
            entries.insert(format!("{}.{}", cat, rest), value);
        }
    }
}
