//! Custom-property tables with per-mode overrides.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, TokenError};

/// Anything alias resolution can look custom properties up in.
pub trait PropertySource {
    /// Raw value of a property such as `--border`.
    fn lookup(&self, name: &str) -> Option<&str>;

    /// All property names visible through this source, sorted.
    fn names(&self) -> Vec<&str>;
}

/// A set of CSS custom properties with optional mode overrides.
///
/// Mode lookups check the mode's overrides first and fall back to the base set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomPropertyTable {
    base: BTreeMap<String, String>,

    /// mode name -> property name -> value
    modes: BTreeMap<String, BTreeMap<String, String>>,
}

impl CustomPropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a base property.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.base.insert(normalize_name(name.into()), value.into());
    }

    /// Insert a property override for one mode.
    pub fn insert_mode(
        &mut self,
        mode: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.modes
            .entry(mode.into())
            .or_default()
            .insert(normalize_name(name.into()), value.into());
    }

    /// Declare a mode even if it overrides nothing.
    pub fn add_mode(&mut self, mode: impl Into<String>) {
        self.modes.entry(mode.into()).or_default();
    }

    /// Get a base property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.base.get(name).map(|s| s.as_str())
    }

    /// Get a property with a mode applied.
    pub fn get_with_mode(&self, name: &str, mode: &str) -> Option<&str> {
        self.modes
            .get(mode)
            .and_then(|m| m.get(name))
            .or_else(|| self.base.get(name))
            .map(|s| s.as_str())
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(|s| s.as_str())
    }

    pub fn has_mode(&self, mode: &str) -> bool {
        self.modes.contains_key(mode)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.modes.values().all(|m| m.is_empty())
    }

    /// A view that resolves through `mode`, or the base set for `None`.
    pub fn view<'a>(&'a self, mode: Option<&'a str>) -> Result<PropertyView<'a>> {
        if let Some(mode) = mode {
            if !self.has_mode(mode) {
                let known: Vec<&str> = self.mode_names().collect();
                return Err(TokenError::Config {
                    message: format!("Unknown mode '{}'", mode),
                    help: Some(if known.is_empty() {
                        "The property table declares no modes".to_string()
                    } else {
                        format!("Available modes: {}", known.join(", "))
                    }),
                });
            }
        }
        Ok(PropertyView { table: self, mode })
    }
}

impl PropertySource for CustomPropertyTable {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.base.keys().map(|s| s.as_str()).collect()
    }
}

/// A property table seen through one mode.
#[derive(Debug, Clone, Copy)]
pub struct PropertyView<'a> {
    table: &'a CustomPropertyTable,
    mode: Option<&'a str>,
}

impl PropertyView<'_> {
    pub fn mode(&self) -> Option<&str> {
        self.mode
    }
}

impl PropertySource for PropertyView<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        match self.mode {
            Some(mode) => self.table.get_with_mode(name, mode),
            None => self.table.get(name),
        }
    }

    fn names(&self) -> Vec<&str> {
        let mut names: BTreeSet<&str> = self.table.base.keys().map(|s| s.as_str()).collect();
        if let Some(overrides) = self.mode.and_then(|m| self.table.modes.get(m)) {
            names.extend(overrides.keys().map(|s| s.as_str()));
        }
        names.into_iter().collect()
    }
}

/// Property names are stored with their leading `--`.
fn normalize_name(name: String) -> String {
    if name.starts_with("--") {
        name
    } else {
        format!("--{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_dark() -> CustomPropertyTable {
        let mut table = CustomPropertyTable::new();
        table.insert("--background", "0 0% 100%");
        table.insert("--radius", "0.5rem");
        table.insert_mode("dark", "--background", "222.2 84% 4.9%");
        table.insert_mode("dark", "--ring", "212.7 26.8% 83.9%");
        table
    }

    #[test]
    fn test_base_lookup() {
        let table = light_dark();
        assert_eq!(table.get("--background"), Some("0 0% 100%"));
        assert_eq!(table.get("--ring"), None);
    }

    #[test]
    fn test_mode_override_and_fallback() {
        let table = light_dark();
        assert_eq!(
            table.get_with_mode("--background", "dark"),
            Some("222.2 84% 4.9%")
        );
        assert_eq!(table.get_with_mode("--radius", "dark"), Some("0.5rem"));
    }

    #[test]
    fn test_names_are_normalized() {
        let mut table = CustomPropertyTable::new();
        table.insert("primary", "#000");
        assert_eq!(table.get("--primary"), Some("#000"));
    }

    #[test]
    fn test_view_through_mode() {
        let table = light_dark();
        let view = table.view(Some("dark")).unwrap();
        assert_eq!(view.lookup("--background"), Some("222.2 84% 4.9%"));
        assert_eq!(view.names(), vec!["--background", "--radius", "--ring"]);

        let base = table.view(None).unwrap();
        assert_eq!(base.lookup("--ring"), None);
        assert_eq!(base.names(), vec!["--background", "--radius"]);
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        let table = light_dark();
        let err = table.view(Some("sepia")).unwrap_err();
        assert!(matches!(err, TokenError::Config { .. }));
    }

    #[test]
    fn test_empty_mode_is_known() {
        let mut table = light_dark();
        table.add_mode("light");
        assert!(table.view(Some("light")).is_ok());
    }
}
