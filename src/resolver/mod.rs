//! Token resolution: declarations in, flat table and timelines out.
//!
//! Resolution runs in fixed passes over an immutable declaration tree:
//!
//! 1. flatten groups into dotted paths (with `DEFAULT` dual addressing)
//! 2. substitute `var(--name)` references from the property source
//! 3. apply the namespace policy and colour format
//! 4. validate keyframes and compile animation bindings
//!
//! Any error aborts the whole resolution; there is no partial result.
//!
//! # Example
//!
//! ```ignore
//! use tokenc::parser::{parse_declarations, parse_properties};
//! use tokenc::resolver::load;
//!
//! let tree = parse_declarations(&theme_source)?;
//! let properties = parse_properties(&properties_source)?;
//! let theme = load(&tree, &properties.view(Some("dark"))?)?;
//!
//! println!("{:?}", theme.tokens.get("colors.border"));
//! ```

mod alias;
mod animation;
mod flatten;
mod namespace;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::Result;
use crate::types::{
    normalize_colour, ColorFormat, CompiledAnimation, DeclarationTree, PropertySource,
    ResolvedTokenTable, TokenValue,
};

use alias::AliasResolver;

pub use namespace::NamespacePolicy;

/// Category whose values are subject to `ColorFormat`.
const COLOUR_CATEGORY: &str = "colors";

/// Knobs that change how declarations resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOptions {
    pub namespaces: NamespacePolicy,
    pub color_format: ColorFormat,
}

/// Bookkeeping from a resolution, used by lint checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionNotes {
    /// Custom properties that some token reached
    pub referenced_properties: BTreeSet<String>,
    /// Legacy paths replaced by an overlay namespace
    pub shadowed: Vec<String>,
}

/// Everything a resolution produces. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTheme {
    pub tokens: ResolvedTokenTable,
    pub animations: BTreeMap<String, CompiledAnimation>,
    pub plugins: Vec<String>,
    #[serde(skip)]
    pub notes: ResolutionNotes,
}

/// Resolves declaration trees with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    options: ResolveOptions,
}

impl TokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve `tree` against `properties`.
    pub fn resolve<P>(&self, tree: &DeclarationTree, properties: &P) -> Result<ResolvedTheme>
    where
        P: PropertySource + ?Sized,
    {
        let leaves = flatten::flatten(&tree.tokens)?;
        tracing::debug!(leaves = leaves.len(), "flattened declarations");

        let mut aliases = AliasResolver::new(properties, leaves.len());
        let mut entries = BTreeMap::new();
        for (path, value) in &leaves {
            let resolved = match value {
                TokenValue::Literal(literal) => literal.clone(),
                TokenValue::Alias(template) => aliases.resolve(path, template)?,
                // flatten only yields leaves
                TokenValue::Group(_) => continue,
            };
            entries.insert(path.clone(), resolved);
        }
        let referenced_properties = aliases.into_referenced();
        tracing::debug!(
            properties = referenced_properties.len(),
            "resolved custom-property aliases"
        );

        let shadowed = namespace::apply(&self.options.namespaces, &mut entries);

        if self.options.color_format != ColorFormat::Preserve {
            let prefix = format!("{}.", COLOUR_CATEGORY);
            for (path, value) in entries.iter_mut() {
                if path.starts_with(&prefix) {
                    *value = normalize_colour(value, self.options.color_format);
                }
            }
        }

        let animations = animation::compile(tree)?;
        tracing::debug!(animations = animations.len(), "compiled animations");

        Ok(ResolvedTheme {
            tokens: ResolvedTokenTable::from_entries(entries),
            animations,
            plugins: tree.plugins.clone(),
            notes: ResolutionNotes {
                referenced_properties,
                shadowed,
            },
        })
    }
}

/// Resolve with default options.
pub fn load<P>(tree: &DeclarationTree, properties: &P) -> Result<ResolvedTheme>
where
    P: PropertySource + ?Sized,
{
    TokenResolver::new().resolve(tree, properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;
    use crate::types::{CustomPropertyTable, TokenGroup, DEFAULT_KEY};

    fn leaf(value: &str) -> TokenValue {
        TokenValue::leaf(value).unwrap()
    }

    fn colors_tree(entries: Vec<(&str, TokenValue)>) -> DeclarationTree {
        let mut colors = TokenGroup::new();
        for (k, v) in entries {
            colors.insert(k, v).unwrap();
        }
        let mut tree = DeclarationTree::new();
        tree.add_category("colors", TokenValue::Group(colors)).unwrap();
        tree
    }

    fn spark() -> TokenValue {
        let mut spark = TokenGroup::new();
        spark.insert(DEFAULT_KEY, leaf("#FF6F61")).unwrap();
        spark.insert("hover", leaf("#FF857A")).unwrap();
        TokenValue::Group(spark)
    }

    #[test]
    fn test_spark_dual_addressing() {
        let tree = colors_tree(vec![("spark", spark())]);
        let theme = load(&tree, &CustomPropertyTable::new()).unwrap();

        let colors = theme.tokens.section("colors");
        assert_eq!(colors.get("spark"), Some("#FF6F61"));
        assert_eq!(colors.get("spark.DEFAULT"), Some("#FF6F61"));
        assert_eq!(colors.get("spark.hover"), Some("#FF857A"));
    }

    #[test]
    fn test_alias_default_shares_value() {
        let mut border = TokenGroup::new();
        border.insert(DEFAULT_KEY, leaf("hsl(var(--border))")).unwrap();
        let tree = colors_tree(vec![("border", TokenValue::Group(border))]);

        let mut props = CustomPropertyTable::new();
        props.insert("--border", "214 32% 91%");
        let theme = load(&tree, &props).unwrap();

        assert_eq!(theme.tokens.get("colors.border"), Some("hsl(214 32% 91%)"));
        assert_eq!(
            theme.tokens.get("colors.border"),
            theme.tokens.get("colors.border.DEFAULT")
        );
        assert!(theme.notes.referenced_properties.contains("--border"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let tree = colors_tree(vec![("spark", spark()), ("ring", leaf("var(--ring)"))]);
        let mut props = CustomPropertyTable::new();
        props.insert("--ring", "#000");

        let a = load(&tree, &props).unwrap();
        let b = load(&tree, &props).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tokens.fingerprint(), b.tokens.fingerprint());
    }

    #[test]
    fn test_mode_view_changes_values() {
        let tree = colors_tree(vec![("background", leaf("hsl(var(--background))"))]);
        let mut props = CustomPropertyTable::new();
        props.insert("--background", "0 0% 100%");
        props.insert_mode("dark", "--background", "0 0% 0%");

        let light = load(&tree, &props.view(None).unwrap()).unwrap();
        let dark = load(&tree, &props.view(Some("dark")).unwrap()).unwrap();

        assert_eq!(light.tokens.get("colors.background"), Some("hsl(0 0% 100%)"));
        assert_eq!(dark.tokens.get("colors.background"), Some("hsl(0 0% 0%)"));
        assert_ne!(light.tokens.fingerprint(), dark.tokens.fingerprint());
    }

    #[test]
    fn test_hex_colour_format_only_touches_colors() {
        let mut tree = colors_tree(vec![("background", leaf("hsl(var(--background))"))]);
        tree.add_category("boxShadow", leaf("0 1px 2px rgb(0 0 0 / 5%)"))
            .unwrap();
        let mut props = CustomPropertyTable::new();
        props.insert("--background", "0 0% 100%");

        let resolver = TokenResolver::with_options(ResolveOptions {
            color_format: ColorFormat::Hex,
            ..Default::default()
        });
        let theme = resolver.resolve(&tree, &props).unwrap();

        assert_eq!(theme.tokens.get("colors.background"), Some("#FFFFFF"));
        assert_eq!(theme.tokens.get("boxShadow"), Some("0 1px 2px rgb(0 0 0 / 5%)"));
    }

    #[test]
    fn test_error_aborts_whole_resolution() {
        let tree = colors_tree(vec![("spark", spark()), ("brand", leaf("var(--brand)"))]);
        let result = load(&tree, &CustomPropertyTable::new());
        assert!(matches!(result, Err(TokenError::UnresolvedAlias { .. })));
    }

    #[test]
    fn test_overlay_records_shadowed() {
        let mut brillu = TokenGroup::new();
        brillu.insert("spark", spark()).unwrap();
        let tree = colors_tree(vec![
            ("spark", leaf("#CCCCCC")),
            ("brillu", TokenValue::Group(brillu)),
        ]);

        let resolver = TokenResolver::with_options(ResolveOptions {
            namespaces: NamespacePolicy::Overlay {
                namespace: "brillu".to_string(),
            },
            ..Default::default()
        });
        let theme = resolver.resolve(&tree, &CustomPropertyTable::new()).unwrap();

        assert_eq!(theme.tokens.get("colors.spark"), Some("#FF6F61"));
        assert_eq!(theme.notes.shadowed, vec!["colors.spark".to_string()]);
    }

    #[test]
    fn test_plugins_pass_through() {
        let mut tree = DeclarationTree::new();
        tree.plugins = vec!["tailwindcss-animate".to_string()];
        let theme = load(&tree, &CustomPropertyTable::new()).unwrap();
        assert_eq!(theme.plugins, vec!["tailwindcss-animate"]);
    }
}
