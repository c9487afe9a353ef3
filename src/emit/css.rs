//! CSS output: custom properties, `@keyframes` and animation utility rules.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::resolver::ResolvedTheme;
use crate::types::{TimelinePhase, DEFAULT_KEY};

/// Custom property name for a token path: `colors.brillu.spark` becomes
/// `--colors-brillu-spark`.
pub fn custom_property_name(path: &str) -> String {
    let mut name = String::with_capacity(path.len() + 2);
    name.push_str("--");
    for c in path.chars() {
        match c {
            '.' => name.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => name.push(c),
            c => {
                name.push('\\');
                name.push(c);
            }
        }
    }
    name
}

/// Render a resolved theme as a stylesheet.
pub fn to_css(theme: &ResolvedTheme) -> String {
    let mut blocks = Vec::new();

    if !theme.tokens.is_empty() {
        let mut root = String::from(":root {\n");
        for (path, value) in theme.tokens.iter() {
            // `x.DEFAULT` always equals `x`
            if is_default_alias(path) {
                continue;
            }
            let _ = writeln!(root, "  {}: {};", custom_property_name(path), value);
        }
        root.push_str("}\n");
        blocks.push(root);
    }

    let mut keyframes: BTreeMap<&str, &[TimelinePhase]> = BTreeMap::new();
    for animation in theme.animations.values() {
        if let Some(name) = &animation.keyframes {
            keyframes.insert(name.as_str(), animation.phases.as_slice());
        }
    }
    for (name, phases) in keyframes {
        blocks.push(keyframes_block(name, phases));
    }

    for animation in theme.animations.values() {
        blocks.push(format!(
            ".animate-{} {{\n  animation: {};\n}}\n",
            animation.name, animation.shorthand
        ));
    }

    blocks.join("\n")
}

pub(crate) fn is_default_alias(path: &str) -> bool {
    path.strip_suffix(DEFAULT_KEY)
        .is_some_and(|parent| parent.ends_with('.'))
}

fn keyframes_block(name: &str, phases: &[TimelinePhase]) -> String {
    let mut block = format!("@keyframes {} {{\n", name);
    for phase in phases {
        let _ = writeln!(block, "  {} {{", phase.offset);
        for (property, value) in phase.properties.iter() {
            let _ = writeln!(block, "    {}: {};", property, value);
        }
        block.push_str("  }\n");
    }
    block.push_str("}\n");
    block
}
