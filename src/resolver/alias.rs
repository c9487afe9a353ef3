//! Second pass: substitute custom-property references.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, TokenError};
use crate::types::{AliasTemplate, PropertySource, Segment};

/// Resolves alias templates against a property source, caching each
/// property's final value.
pub(crate) struct AliasResolver<'p, P: PropertySource + ?Sized> {
    properties: &'p P,
    resolved: HashMap<String, String>,
    /// Properties that were looked up and exist
    referenced: BTreeSet<String>,
    hop_limit: usize,
}

impl<'p, P: PropertySource + ?Sized> AliasResolver<'p, P> {
    /// `token_count` plus the property count bounds every chain walk.
    pub fn new(properties: &'p P, token_count: usize) -> Self {
        Self {
            properties,
            resolved: HashMap::new(),
            referenced: BTreeSet::new(),
            hop_limit: token_count + properties.names().len() + 1,
        }
    }

    /// Resolve the template declared at `path` into a literal.
    pub fn resolve(&mut self, path: &str, template: &AliasTemplate) -> Result<String> {
        let mut chain = Vec::new();
        self.render(path, template, &mut chain)
    }

    pub fn into_referenced(self) -> BTreeSet<String> {
        self.referenced
    }

    fn render(
        &mut self,
        path: &str,
        template: &AliasTemplate,
        chain: &mut Vec<String>,
    ) -> Result<String> {
        let mut out = String::new();

        for segment in template.segments() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var { property, fallback } => {
                    match (self.property(path, property, chain)?, fallback) {
                        (Some(value), _) => out.push_str(&value),
                        (None, Some(fallback)) => {
                            let value = self.render(path, fallback, chain)?;
                            out.push_str(&value);
                        }
                        (None, None) => {
                            return Err(TokenError::UnresolvedAlias {
                                path: path.to_string(),
                                property: property.clone(),
                            })
                        }
                    }
                }
            }
        }

        Ok(out)
    }

    /// Final value of one property, or `None` if it is not defined.
    fn property(
        &mut self,
        path: &str,
        name: &str,
        chain: &mut Vec<String>,
    ) -> Result<Option<String>> {
        if let Some(value) = self.resolved.get(name) {
            return Ok(Some(value.clone()));
        }

        if let Some(start) = chain.iter().position(|n| n == name) {
            let mut cycle: Vec<&str> = chain[start..].iter().map(|s| s.as_str()).collect();
            cycle.push(name);
            return Err(TokenError::CyclicAlias {
                path: path.to_string(),
                chain: cycle.join(" -> "),
            });
        }

        if chain.len() >= self.hop_limit {
            return Err(TokenError::CyclicAlias {
                path: path.to_string(),
                chain: format!("{} -> ... ({} hops)", chain.join(" -> "), chain.len()),
            });
        }

        let properties = self.properties;
        let Some(raw) = properties.lookup(name) else {
            return Ok(None);
        };
        self.referenced.insert(name.to_string());

        let value = match AliasTemplate::parse(raw)? {
            Some(template) => {
                chain.push(name.to_string());
                let value = self.render(path, &template, chain);
                chain.pop();
                value?
            }
            None => raw.to_string(),
        };

        self.resolved.insert(name.to_string(), value.clone());
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomPropertyTable;

    fn template(source: &str) -> AliasTemplate {
        AliasTemplate::parse(source).unwrap().unwrap()
    }

    fn table(pairs: &[(&str, &str)]) -> CustomPropertyTable {
        let mut t = CustomPropertyTable::new();
        for (k, v) in pairs {
            t.insert(*k, *v);
        }
        t
    }

    #[test]
    fn test_direct_reference() {
        let props = table(&[("--border", "214.3 31.8% 91.4%")]);
        let mut resolver = AliasResolver::new(&props, 1);

        let value = resolver
            .resolve("colors.border", &template("hsl(var(--border))"))
            .unwrap();
        assert_eq!(value, "hsl(214.3 31.8% 91.4%)");
    }

    #[test]
    fn test_chained_properties() {
        let props = table(&[
            ("--accent", "var(--brand)"),
            ("--brand", "var(--spark)"),
            ("--spark", "#FF6F61"),
        ]);
        let mut resolver = AliasResolver::new(&props, 1);

        let value = resolver.resolve("colors.accent", &template("var(--accent)")).unwrap();
        assert_eq!(value, "#FF6F61");
        assert_eq!(
            resolver.into_referenced().into_iter().collect::<Vec<_>>(),
            vec!["--accent", "--brand", "--spark"]
        );
    }

    #[test]
    fn test_fallback_used_when_missing() {
        let props = table(&[("--radius", "0.5rem")]);
        let mut resolver = AliasResolver::new(&props, 1);

        let value = resolver
            .resolve("borderRadius.xl", &template("var(--radius-xl, calc(var(--radius) + 4px))"))
            .unwrap();
        assert_eq!(value, "calc(0.5rem + 4px)");
    }

    #[test]
    fn test_fallback_ignored_when_present() {
        let props = table(&[("--radius", "0.5rem")]);
        let mut resolver = AliasResolver::new(&props, 1);

        let value = resolver.resolve("r", &template("var(--radius, 1px)")).unwrap();
        assert_eq!(value, "0.5rem");
    }

    #[test]
    fn test_unresolved_names_path_and_property() {
        let props = table(&[]);
        let mut resolver = AliasResolver::new(&props, 1);

        let err = resolver
            .resolve("colors.brand", &template("hsl(var(--brand))"))
            .unwrap_err();
        match err {
            TokenError::UnresolvedAlias { path, property } => {
                assert_eq!(path, "colors.brand");
                assert_eq!(property, "--brand");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_deep_in_chain() {
        let props = table(&[("--a", "var(--missing)")]);
        let mut resolver = AliasResolver::new(&props, 1);

        let err = resolver.resolve("colors.a", &template("var(--a)")).unwrap_err();
        assert!(matches!(err, TokenError::UnresolvedAlias { property, .. } if property == "--missing"));
    }

    #[test]
    fn test_two_step_cycle() {
        let props = table(&[("--a", "var(--b)"), ("--b", "var(--a)")]);
        let mut resolver = AliasResolver::new(&props, 1);

        let err = resolver.resolve("colors.a", &template("var(--a)")).unwrap_err();
        match err {
            TokenError::CyclicAlias { path, chain } => {
                assert_eq!(path, "colors.a");
                assert_eq!(chain, "--a -> --b -> --a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_self_reference_cycle() {
        let props = table(&[("--a", "calc(var(--a) * 2)")]);
        let mut resolver = AliasResolver::new(&props, 1);

        assert!(matches!(
            resolver.resolve("x", &template("var(--a)")),
            Err(TokenError::CyclicAlias { .. })
        ));
    }

    #[test]
    fn test_cache_reused_across_tokens() {
        let props = table(&[("--radius", "0.5rem")]);
        let mut resolver = AliasResolver::new(&props, 2);

        let lg = resolver.resolve("borderRadius.lg", &template("var(--radius)")).unwrap();
        let md = resolver
            .resolve("borderRadius.md", &template("calc(var(--radius) - 2px)"))
            .unwrap();
        assert_eq!(lg, "0.5rem");
        assert_eq!(md, "calc(0.5rem - 2px)");
    }
}
