//! Keyframe and animation declarations.

use serde_yaml::Value;

use crate::error::{Result, TokenError};
use crate::types::{
    parse_time, AnimationBinding, Iterations, KeyframeDefinition, PropertySet, Timing,
};

use super::scalar::{key, mapping, scalar};

/// Parse `theme.keyframes`: name -> phase -> property -> value.
pub(crate) fn parse_keyframes(value: &Value) -> Result<Vec<KeyframeDefinition>> {
    let Some(map) = mapping(value, "keyframes")? else {
        return Ok(Vec::new());
    };

    let mut definitions = Vec::new();
    for (k, phases) in map {
        let name = key(k, "keyframes")?;
        let mut definition = KeyframeDefinition::new(name.clone());

        let context = format!("keyframes '{}'", name);
        if let Some(phases) = mapping(phases, &context)? {
            for (phase_key, properties) in phases {
                let label = key(phase_key, &context)?;
                let properties = parse_property_set(properties, &name, &label)?;
                definition.push_phase(&label, properties)?;
            }
        }

        definitions.push(definition);
    }

    Ok(definitions)
}

fn parse_property_set(value: &Value, keyframes: &str, phase: &str) -> Result<PropertySet> {
    let context = format!("phase '{}' of keyframes '{}'", phase, keyframes);
    let mut set = PropertySet::new();

    let Some(map) = mapping(value, &context)? else {
        return Ok(set);
    };

    for (k, v) in map {
        let property = key(k, &context)?;
        let value = scalar(v).ok_or_else(|| TokenError::Parse {
            message: format!("Property '{}' in {} must be a plain value", property, context),
            help: None,
        })?;
        if !set.insert(property.clone(), value) {
            return Err(TokenError::DuplicateKey {
                path: format!("keyframes.{}.{}.{}", keyframes, phase, property),
            });
        }
    }

    Ok(set)
}

/// Parse `theme.animation`: name -> shorthand string or timing mapping.
pub(crate) fn parse_animations(value: &Value) -> Result<Vec<AnimationBinding>> {
    let Some(map) = mapping(value, "animation")? else {
        return Ok(Vec::new());
    };

    map.iter()
        .map(|(k, v)| {
            let name = key(k, "animation")?;
            match v {
                Value::Mapping(_) => parse_binding_mapping(name, v),
                other => {
                    let shorthand = scalar(other).ok_or_else(|| TokenError::Parse {
                        message: format!("Animation '{}' has no value", name),
                        help: Some("Use a shorthand like \"spin 1s linear infinite\"".to_string()),
                    })?;
                    AnimationBinding::parse_shorthand(name, &shorthand)
                }
            }
        })
        .collect()
}

/// The long form:
///
/// ```yaml
/// accordion-down:
///   keyframes: accordion-down
///   duration: 0.2s
///   easing: ease-out
/// ```
fn parse_binding_mapping(name: String, value: &Value) -> Result<AnimationBinding> {
    let context = format!("animation '{}'", name);
    let mut keyframes: Option<String> = None;
    let mut timing = Timing::default();

    if let Some(map) = mapping(value, &context)? {
        for (k, v) in map {
            let field = key(k, &context)?;
            let text = scalar(v).ok_or_else(|| TokenError::Parse {
                message: format!("Field '{}' in {} must be a plain value", field, context),
                help: None,
            })?;

            match field.as_str() {
                "keyframes" => keyframes = Some(text),
                "duration" => timing.duration = checked_time(&text, &context)?,
                "delay" => timing.delay = Some(checked_time(&text, &context)?),
                "easing" => timing.easing = text,
                "iterations" => {
                    timing.iterations = Iterations::parse(&text).ok_or_else(|| TokenError::Parse {
                        message: format!("Invalid iteration count '{}' in {}", text, context),
                        help: Some("Use a non-negative number or `infinite`".to_string()),
                    })?
                }
                "direction" => timing.direction = Some(text),
                "fill-mode" => timing.fill_mode = Some(text),
                "play-state" => timing.play_state = Some(text),
                other => {
                    return Err(TokenError::Parse {
                        message: format!("Unknown field '{}' in {}", other, context),
                        help: Some(
                            "Known fields: keyframes, duration, easing, delay, iterations, direction, fill-mode, play-state"
                                .to_string(),
                        ),
                    })
                }
            }
        }
    }

    let keyframes = keyframes.ok_or_else(|| TokenError::Parse {
        message: format!("{} does not name its keyframes", context),
        help: Some("Add `keyframes: <name>`".to_string()),
    })?;

    Ok(AnimationBinding::new(name, keyframes, timing))
}

fn checked_time(text: &str, context: &str) -> Result<String> {
    match parse_time(text) {
        Some(_) => Ok(text.trim().to_string()),
        None => Err(TokenError::Parse {
            message: format!("Invalid time '{}' in {}", text, context),
            help: Some("Times are written like 150ms or 0.2s".to_string()),
        }),
    }
}
