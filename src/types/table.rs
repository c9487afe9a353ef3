//! The resolved token table.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Immutable mapping from dotted token path to final value.
///
/// Paths iterate in lexicographic order, so two tables built from the
/// same input serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedTokenTable {
    entries: BTreeMap<String, String>,
}

impl ResolvedTokenTable {
    pub(crate) fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Get a value by full path, e.g. `colors.brillu.spark.hover`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|s| s.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View the entries under `prefix` with the prefix stripped.
    pub fn section<'a>(&'a self, prefix: &str) -> TableSection<'a> {
        TableSection {
            table: self,
            prefix: format!("{}.", prefix),
        }
    }

    /// SHA-256 over every `path = value` pair, hex encoded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (path, value) in &self.entries {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            hasher.update(value.as_bytes());
            hasher.update([b'\n']);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// A category-scoped view of a table (`colors.spark` seen as `spark`).
#[derive(Debug, Clone)]
pub struct TableSection<'a> {
    table: &'a ResolvedTokenTable,
    prefix: String,
}

impl<'a> TableSection<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.table
            .entries
            .get(&format!("{}{}", self.prefix, name))
            .map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        let prefix = self.prefix.as_str();
        self.table
            .entries
            .range(prefix.to_string()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(move |(k, v)| (&k[prefix.len()..], v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
