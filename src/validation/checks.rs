//! Lint checks over declarations and a resolved theme.
//!
//! Each check returns a `ValidationResult`. None of them can fail a
//! resolution. Most point at dead or suspicious declarations; a custom
//! property name collision is an error because the stylesheet would lose a
//! token.

use std::collections::{BTreeMap, BTreeSet};

use crate::emit::{custom_property_name, is_default_alias};
use crate::resolver::ResolvedTheme;
use crate::types::{DeclarationTree, PropertySource, TokenGroup, TokenValue};

use super::warning::{Diagnostic, ValidationResult};

pub const UNUSED_KEYFRAMES: &str = "tokenc::lint::unused-keyframes";
pub const EMPTY_GROUP: &str = "tokenc::lint::empty-group";
pub const UNUSED_PROPERTY: &str = "tokenc::lint::unused-property";
pub const SHADOWED_TOKEN: &str = "tokenc::lint::shadowed-token";
pub const CSS_NAME_COLLISION: &str = "tokenc::lint::css-name-collision";

/// Keyframe definitions that no animation binds.
pub fn check_unused_keyframes(tree: &DeclarationTree) -> ValidationResult {
    let mut result = ValidationResult::new();

    let bound: BTreeSet<&str> = tree
        .animations
        .values()
        .filter_map(|binding| binding.keyframes.as_deref())
        .collect();

    for name in tree.keyframes.keys() {
        if !bound.contains(name.as_str()) {
            result.push(
                Diagnostic::warning(
                    UNUSED_KEYFRAMES,
                    format!("Keyframes '{}' are not used by any animation", name),
                )
                .with_subject(name.clone())
                .with_help("Bind them under theme.animation or remove them"),
            );
        }
    }

    result
}

/// Token groups with no entries. They produce no paths at all.
pub fn check_empty_groups(tree: &DeclarationTree) -> ValidationResult {
    let mut result = ValidationResult::new();
    walk_groups(&tree.tokens, "", &mut result);
    result
}

fn walk_groups(group: &TokenGroup, prefix: &str, result: &mut ValidationResult) {
    for (key, value) in group.entries() {
        let TokenValue::Group(child) = value else {
            continue;
        };
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };

        if child.is_empty() {
            result.push(
                Diagnostic::warning(EMPTY_GROUP, format!("Group '{}' is empty", path))
                    .with_subject(path.clone()),
            );
        } else {
            walk_groups(child, &path, result);
        }
    }
}

/// Custom properties no token reaches, directly or through another property.
pub fn check_unused_properties(
    properties: &dyn PropertySource,
    theme: &ResolvedTheme,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let referenced = &theme.notes.referenced_properties;

    for name in properties.names() {
        if !referenced.contains(name) {
            result.push(
                Diagnostic::warning(
                    UNUSED_PROPERTY,
                    format!("Custom property '{}' is not referenced by any token", name),
                )
                .with_subject(name),
            );
        }
    }

    result
}

/// Legacy tokens replaced by an overlay namespace.
pub fn check_shadowed_tokens(theme: &ResolvedTheme) -> ValidationResult {
    let mut result = ValidationResult::new();

    for path in &theme.notes.shadowed {
        result.push(
            Diagnostic::warning(
                SHADOWED_TOKEN,
                format!("Token '{}' is shadowed by the overlay namespace", path),
            )
            .with_subject(path.clone())
            .with_help("Remove the legacy declaration once nothing depends on it"),
        );
    }

    result
}

/// Token paths that map to the same CSS custom property, such as
/// `spacing.a-b` and `spacing.a.b`.
pub fn check_css_name_collisions(theme: &ResolvedTheme) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    for (path, _) in theme.tokens.iter() {
        if is_default_alias(path) {
            continue;
        }
        let name = custom_property_name(path);
        match seen.get(&name) {
            Some(first) => result.push(
                Diagnostic::error(
                    CSS_NAME_COLLISION,
                    format!("Tokens '{}' and '{}' both become {}", first, path, name),
                )
                .with_subject(path)
                .with_help("Rename one of them; CSS output keeps only the last"),
            ),
            None => {
                seen.insert(name, path);
            }
        }
    }

    result
}
