//! Keyframe validation and animation timeline compilation.

use std::collections::BTreeMap;

use crate::error::{Result, TokenError};
use crate::types::{CompiledAnimation, DeclarationTree};

/// Validate every keyframe definition and compile every binding.
pub(crate) fn compile(tree: &DeclarationTree) -> Result<BTreeMap<String, CompiledAnimation>> {
    for keyframes in tree.keyframes.values() {
        keyframes.validate()?;
    }

    let mut compiled = BTreeMap::new();
    for binding in tree.animations.values() {
        let phases = match &binding.keyframes {
            Some(name) => tree
                .keyframes
                .get(name)
                .ok_or_else(|| TokenError::MissingKeyframe {
                    animation: binding.name.clone(),
                    keyframes: name.clone(),
                })?
                .timeline(),
            None => Vec::new(),
        };

        compiled.insert(
            binding.name.clone(),
            CompiledAnimation {
                name: binding.name.clone(),
                keyframes: binding.keyframes.clone(),
                phases,
                timing: binding.timing.clone(),
                shorthand: binding.shorthand(),
            },
        );
    }

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnimationBinding, KeyframeDefinition, PhaseOffset, PropertySet};

    fn fade() -> KeyframeDefinition {
        let mut opaque = PropertySet::new();
        opaque.insert("opacity", "1");
        let mut clear = PropertySet::new();
        clear.insert("opacity", "0");

        let mut kf = KeyframeDefinition::new("fade");
        kf.push_phase("from", opaque).unwrap();
        kf.push_phase("to", clear).unwrap();
        kf
    }

    #[test]
    fn test_compiles_bound_keyframes() {
        let mut tree = DeclarationTree::new();
        tree.add_keyframes(fade());
        tree.add_animation(AnimationBinding::parse_shorthand("fade-out", "fade 150ms linear").unwrap());

        let compiled = compile(&tree).unwrap();
        let anim = &compiled["fade-out"];
        assert_eq!(anim.keyframes.as_deref(), Some("fade"));
        assert_eq!(anim.phases.len(), 2);
        assert_eq!(anim.phases[0].offset, PhaseOffset::START);
        assert_eq!(anim.timing.duration, "150ms");
        assert_eq!(anim.shorthand, "fade 150ms linear");
    }

    #[test]
    fn test_missing_keyframes() {
        let mut tree = DeclarationTree::new();
        tree.add_animation(AnimationBinding::parse_shorthand("wobble", "wobble 1s").unwrap());

        let err = compile(&tree).unwrap_err();
        match err {
            TokenError::MissingKeyframe {
                animation,
                keyframes,
            } => {
                assert_eq!(animation, "wobble");
                assert_eq!(keyframes, "wobble");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unbound_keyframes_still_validated() {
        let mut broken = KeyframeDefinition::new("broken");
        broken.push_phase("to", PropertySet::new()).unwrap();
        broken.push_phase("from", PropertySet::new()).unwrap();

        let mut tree = DeclarationTree::new();
        tree.add_keyframes(broken);

        assert!(matches!(
            compile(&tree),
            Err(TokenError::MalformedPhase { .. })
        ));
    }

    #[test]
    fn test_none_binding_has_no_phases() {
        let mut tree = DeclarationTree::new();
        tree.add_animation(AnimationBinding::parse_shorthand("none", "none").unwrap());

        let compiled = compile(&tree).unwrap();
        assert!(compiled["none"].phases.is_empty());
        assert_eq!(compiled["none"].shorthand, "none");
    }
}
