//! Token groups and the full declaration tree.

use std::collections::BTreeMap;

use crate::error::{Result, TokenError};

use super::{AnimationBinding, KeyframeDefinition, TokenValue};

/// Key that makes a group addressable by its own path.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// An ordered mapping from keys to values, unique per level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    entries: Vec<(String, TokenValue)>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Keys are compared case-sensitively.
    pub fn insert(&mut self, key: impl Into<String>, value: TokenValue) -> Result<()> {
        let key = key.into();
        if self.contains(&key) {
            return Err(TokenError::DuplicateKey { path: key });
        }
        self.entries.push((key, value));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The `DEFAULT` entry, if the group has one.
    pub fn default_value(&self) -> Option<&TokenValue> {
        self.get(DEFAULT_KEY)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deep-merge `other` over this group.
    ///
    /// Groups merge recursively; any other pairing is replaced by the
    /// incoming value.
    pub fn extend_with(&mut self, other: TokenGroup) {
        for (key, incoming) in other.entries {
            let Some(index) = self.entries.iter().position(|(k, _)| *k == key) else {
                self.entries.push((key, incoming));
                continue;
            };

            match incoming {
                TokenValue::Group(incoming) => {
                    if let TokenValue::Group(existing) = &mut self.entries[index].1 {
                        existing.extend_with(incoming);
                    } else {
                        self.entries[index].1 = TokenValue::Group(incoming);
                    }
                }
                value => self.entries[index].1 = value,
            }
        }
    }
}

/// Everything a theme configuration declares.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTree {
    /// Token categories (`colors`, `spacing`, ...) as top-level entries
    pub tokens: TokenGroup,

    /// Keyframe definitions by name
    pub keyframes: BTreeMap<String, KeyframeDefinition>,

    /// Animation bindings by name
    pub animations: BTreeMap<String, AnimationBinding>,

    /// Plugin identifiers, passed through untouched
    pub plugins: Vec<String>,
}

impl DeclarationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token category such as `colors`.
    pub fn add_category(&mut self, name: impl Into<String>, value: TokenValue) -> Result<()> {
        self.tokens.insert(name, value)
    }

    /// Add or replace a keyframe definition.
    pub fn add_keyframes(&mut self, keyframes: KeyframeDefinition) {
        self.keyframes.insert(keyframes.name.clone(), keyframes);
    }

    /// Add or replace an animation binding.
    pub fn add_animation(&mut self, binding: AnimationBinding) {
        self.animations.insert(binding.name.clone(), binding);
    }

    /// Number of leaf values across all categories.
    pub fn leaf_count(&self) -> usize {
        fn count(group: &TokenGroup) -> usize {
            group
                .entries()
                .map(|(_, value)| match value {
                    TokenValue::Group(child) => count(child),
                    _ => 1,
                })
                .sum()
        }
        count(&self.tokens)
    }
}
