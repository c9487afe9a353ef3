//! Animation bindings, timing parameters, and compiled timelines.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Result, TokenError};

use super::TimelinePhase;

const EASING_KEYWORDS: &[&str] = &[
    "linear",
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
];
const EASING_FUNCTIONS: &[&str] = &["cubic-bezier(", "steps(", "linear("];
const DIRECTIONS: &[&str] = &["normal", "reverse", "alternate", "alternate-reverse"];
const FILL_MODES: &[&str] = &["none", "forwards", "backwards", "both"];
const PLAY_STATES: &[&str] = &["running", "paused"];

/// How many times an animation repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Iterations {
    Count(f64),
    Infinite,
}

impl Iterations {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "infinite" {
            return Some(Iterations::Infinite);
        }
        let count: f64 = value.parse().ok()?;
        (count.is_finite() && count >= 0.0).then_some(Iterations::Count(count))
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Count(1.0)
    }
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iterations::Count(n) => write!(f, "{}", n),
            Iterations::Infinite => write!(f, "infinite"),
        }
    }
}

impl Serialize for Iterations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Timing parameters of an animation, kept as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timing {
    pub duration: String,
    pub easing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    pub iterations: Iterations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_state: Option<String>,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: "0s".to_string(),
            easing: "ease".to_string(),
            delay: None,
            iterations: Iterations::default(),
            direction: None,
            fill_mode: None,
            play_state: None,
        }
    }
}

impl Timing {
    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        parse_time(&self.duration).unwrap_or(0.0)
    }

    /// Delay in milliseconds (zero when unset).
    pub fn delay_ms(&self) -> f64 {
        self.delay.as_deref().and_then(parse_time).unwrap_or(0.0)
    }
}

/// A name bound to keyframes plus timing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationBinding {
    pub name: String,
    /// `None` for the `none` animation
    pub keyframes: Option<String>,
    pub timing: Timing,
}

impl AnimationBinding {
    pub fn new(name: impl Into<String>, keyframes: impl Into<String>, timing: Timing) -> Self {
        Self {
            name: name.into(),
            keyframes: Some(keyframes.into()),
            timing,
        }
    }

    /// Parse a CSS `animation` shorthand such as
    /// `pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite`.
    pub fn parse_shorthand(name: impl Into<String>, value: &str) -> Result<Self> {
        let name = name.into();
        let value = value.trim();

        if value == "none" {
            return Ok(Self {
                name,
                keyframes: None,
                timing: Timing::default(),
            });
        }

        let words = split_words(value).map_err(|message| shorthand_error(&name, value, message))?;

        let mut keyframes: Option<String> = None;
        let mut timing = Timing::default();
        let mut times = 0;
        let mut saw_easing = false;
        let mut saw_iterations = false;

        for word in words {
            if parse_time(word).is_some() {
                match times {
                    0 => timing.duration = word.to_string(),
                    1 => timing.delay = Some(word.to_string()),
                    _ => return Err(shorthand_error(&name, value, "more than two time values")),
                }
                times += 1;
            } else if !saw_easing && is_easing(word) {
                timing.easing = word.to_string();
                saw_easing = true;
            } else if !saw_iterations && Iterations::parse(word).is_some() {
                timing.iterations = Iterations::parse(word).unwrap_or_default();
                saw_iterations = true;
            } else if timing.direction.is_none() && DIRECTIONS.contains(&word) {
                timing.direction = Some(word.to_string());
            } else if timing.fill_mode.is_none() && FILL_MODES.contains(&word) {
                timing.fill_mode = Some(word.to_string());
            } else if timing.play_state.is_none() && PLAY_STATES.contains(&word) {
                timing.play_state = Some(word.to_string());
            } else if keyframes.is_none() && is_identifier(word) {
                keyframes = Some(word.to_string());
            } else {
                return Err(shorthand_error(
                    &name,
                    value,
                    &format!("unexpected '{}'", word),
                ));
            }
        }

        let keyframes =
            keyframes.ok_or_else(|| shorthand_error(&name, value, "no keyframes name"))?;

        if parse_time(&timing.duration).is_some_and(|ms| ms < 0.0) {
            return Err(shorthand_error(&name, value, "duration cannot be negative"));
        }

        Ok(Self {
            name,
            keyframes: Some(keyframes),
            timing,
        })
    }

    /// Render the binding back into a canonical `animation` value.
    pub fn shorthand(&self) -> String {
        let Some(keyframes) = &self.keyframes else {
            return "none".to_string();
        };

        let t = &self.timing;
        let mut parts = vec![keyframes.clone(), t.duration.clone(), t.easing.clone()];
        if let Some(delay) = &t.delay {
            parts.push(delay.clone());
        }
        if t.iterations != Iterations::default() {
            parts.push(t.iterations.to_string());
        }
        parts.extend(t.direction.iter().cloned());
        parts.extend(t.fill_mode.iter().cloned());
        parts.extend(t.play_state.iter().cloned());
        parts.join(" ")
    }
}

/// An animation with its keyframes expanded into an ordered timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledAnimation {
    pub name: String,
    pub keyframes: Option<String>,
    pub phases: Vec<TimelinePhase>,
    pub timing: Timing,
    /// Canonical CSS `animation` value
    pub shorthand: String,
}

/// Parse a CSS time (`0.2s`, `150ms`) into milliseconds.
pub fn parse_time(value: &str) -> Option<f64> {
    let value = value.trim();
    let (number, scale) = if let Some(ms) = value.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = value.strip_suffix('s') {
        (s, 1000.0)
    } else {
        return None;
    };

    // Identifiers such as `forwards` also end in "s"
    let numeric_start = number
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !numeric_start {
        return None;
    }

    let parsed: f64 = number.parse().ok()?;
    parsed.is_finite().then_some(parsed * scale)
}

fn is_easing(word: &str) -> bool {
    EASING_KEYWORDS.contains(&word) || EASING_FUNCTIONS.iter().any(|f| word.starts_with(f))
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '-' || c == '_');
    first_ok && word.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Split on whitespace outside parentheses.
fn split_words(value: &str) -> std::result::Result<Vec<&str>, &'static str> {
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or("unbalanced parentheses")?;
            }
            ',' if depth == 0 => return Err("multiple animations in one binding are not supported"),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    words.push(&value[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }

    if depth != 0 {
        return Err("unbalanced parentheses");
    }
    if let Some(s) = start {
        words.push(&value[s..]);
    }
    Ok(words)
}

fn shorthand_error(name: &str, value: &str, reason: &str) -> TokenError {
    TokenError::Parse {
        message: format!("Invalid animation '{}': {} in '{}'", name, reason, value),
        help: Some("Use the CSS animation shorthand: <keyframes> <duration> [easing] [delay] [iterations]".to_string()),
    }
}
