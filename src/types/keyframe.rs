//! Keyframe definitions and phase offsets.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Result, TokenError};

/// Position of a phase on the animation timeline, in percent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PhaseOffset(f64);

impl PhaseOffset {
    /// `from`
    pub const START: Self = Self(0.0);

    /// `to`
    pub const END: Self = Self(100.0);

    /// Parse a single phase marker: `from`, `to` or `NN%`.
    pub fn parse(marker: &str) -> Option<Self> {
        let marker = marker.trim();
        if marker.eq_ignore_ascii_case("from") {
            return Some(Self::START);
        }
        if marker.eq_ignore_ascii_case("to") {
            return Some(Self::END);
        }

        let number = marker.strip_suffix('%')?.trim();
        let percent: f64 = number.parse().ok()?;
        if percent.is_finite() && (0.0..=100.0).contains(&percent) {
            Some(Self(percent))
        } else {
            None
        }
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for PhaseOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for PhaseOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// CSS property/value pairs in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySet(Vec<(String, String)>);

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Returns false if it was already set.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> bool {
        let property = property.into();
        if self.0.iter().any(|(p, _)| *p == property) {
            return false;
        }
        self.0.push((property, value.into()));
        true
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (property, value) in &self.0 {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

/// One declared phase. A key like `75%, 100%` carries several offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframePhase {
    /// The key as written
    pub label: String,
    pub offsets: Vec<PhaseOffset>,
    pub properties: PropertySet,
}

/// A single point of a compiled timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePhase {
    pub offset: PhaseOffset,
    pub properties: PropertySet,
}

/// A named `@keyframes` block.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeDefinition {
    pub name: String,
    phases: Vec<KeyframePhase>,
}

impl KeyframeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phases: Vec::new(),
        }
    }

    /// Append a phase, parsing its key into offsets.
    pub fn push_phase(&mut self, label: &str, properties: PropertySet) -> Result<()> {
        let offsets = label
            .split(',')
            .map(|marker| {
                PhaseOffset::parse(marker).ok_or_else(|| {
                    self.malformed(label, "expected `from`, `to` or a percentage between 0% and 100%")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.phases.push(KeyframePhase {
            label: label.trim().to_string(),
            offsets,
            properties,
        });
        Ok(())
    }

    pub fn phases(&self) -> &[KeyframePhase] {
        &self.phases
    }

    /// Check that no offset repeats and that there are at least two positions.
    pub fn validate(&self) -> Result<()> {
        let points = self.sorted_points();

        for pair in points.windows(2) {
            let (offset, _) = pair[0];
            let (next, phase) = pair[1];
            if next == offset {
                return Err(self.malformed(
                    &phase.label,
                    &format!("{} is declared more than once", next),
                ));
            }
        }

        if points.len() < 2 {
            let label = self.phases.last().map(|p| p.label.as_str()).unwrap_or("");
            return Err(self.malformed(label, "keyframes need at least a start and an end phase"));
        }

        Ok(())
    }

    /// Expand phases into one timeline point per offset, sorted by position.
    pub fn timeline(&self) -> Vec<TimelinePhase> {
        self.sorted_points()
            .into_iter()
            .map(|(offset, phase)| TimelinePhase {
                offset,
                properties: phase.properties.clone(),
            })
            .collect()
    }

    /// Every offset with the phase that declared it. Ties keep declaration order.
    fn sorted_points(&self) -> Vec<(PhaseOffset, &KeyframePhase)> {
        let mut points: Vec<(PhaseOffset, &KeyframePhase)> = self
            .phases
            .iter()
            .flat_map(|phase| phase.offsets.iter().map(move |&offset| (offset, phase)))
            .collect();
        points.sort_by(|(a, _), (b, _)| a.0.total_cmp(&b.0));
        points
    }

    fn malformed(&self, phase: &str, reason: &str) -> TokenError {
        TokenError::MalformedPhase {
            keyframes: self.name.clone(),
            phase: phase.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> PropertySet {
        let mut set = PropertySet::new();
        for (p, v) in pairs {
            set.insert(*p, *v);
        }
        set
    }

    #[test]
    fn test_phase_offset_keywords() {
        assert_eq!(PhaseOffset::parse("from"), Some(PhaseOffset::START));
        assert_eq!(PhaseOffset::parse("to"), Some(PhaseOffset::END));
        assert_eq!(PhaseOffset::parse(" 50% "), Some(PhaseOffset(50.0)));
        assert_eq!(PhaseOffset::parse("33.5%").map(PhaseOffset::percent), Some(33.5));
    }

    #[test]
    fn test_phase_offset_rejects_garbage() {
        assert_eq!(PhaseOffset::parse("50"), None);
        assert_eq!(PhaseOffset::parse("150%"), None);
        assert_eq!(PhaseOffset::parse("-1%"), None);
        assert_eq!(PhaseOffset::parse("middle"), None);
    }

    #[test]
    fn test_phase_offset_display() {
        assert_eq!(PhaseOffset::START.to_string(), "0%");
        assert_eq!(PhaseOffset::END.to_string(), "100%");
        assert_eq!(PhaseOffset(12.5).to_string(), "12.5%");
    }

    #[test]
    fn test_property_set_rejects_repeat() {
        let mut set = PropertySet::new();
        assert!(set.insert("height", "0"));
        assert!(!set.insert("height", "1px"));
        assert_eq!(set.get("height"), Some("0"));
    }

    #[test]
    fn test_accordion_timeline() {
        let mut kf = KeyframeDefinition::new("accordion-down");
        kf.push_phase("from", props(&[("height", "0")])).unwrap();
        kf.push_phase("to", props(&[("height", "var(--radix-accordion-content-height)")]))
            .unwrap();
        kf.validate().unwrap();

        let timeline = kf.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].offset, PhaseOffset::START);
        assert_eq!(timeline[1].offset, PhaseOffset::END);
        assert_eq!(
            timeline[1].properties.get("height"),
            Some("var(--radix-accordion-content-height)")
        );
    }

    #[test]
    fn test_multi_offset_key_expands() {
        let mut kf = KeyframeDefinition::new("ping");
        kf.push_phase("75%, 100%", props(&[("opacity", "0")])).unwrap();
        kf.validate().unwrap();

        let timeline = kf.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].offset.percent(), 75.0);
        assert_eq!(timeline[1].offset.percent(), 100.0);
    }

    #[test]
    fn test_shared_start_and_end_key_sorts_by_position() {
        let mut kf = KeyframeDefinition::new("pulse");
        kf.push_phase("0%, 100%", props(&[("opacity", "1")])).unwrap();
        kf.push_phase("50%", props(&[("opacity", ".5")])).unwrap();
        kf.validate().unwrap();

        let timeline = kf.timeline();
        let offsets: Vec<f64> = timeline.iter().map(|p| p.offset.percent()).collect();
        assert_eq!(offsets, vec![0.0, 50.0, 100.0]);
        let opacity: Vec<&str> = timeline
            .iter()
            .filter_map(|p| p.properties.get("opacity"))
            .collect();
        assert_eq!(opacity, vec!["1", ".5", "1"]);
    }

    #[test]
    fn test_reversed_keywords_sort() {
        let mut kf = KeyframeDefinition::new("fade");
        kf.push_phase("to", props(&[("opacity", "1")])).unwrap();
        kf.push_phase("from", props(&[("opacity", "0")])).unwrap();
        kf.validate().unwrap();

        let timeline = kf.timeline();
        assert_eq!(timeline[0].offset, PhaseOffset::START);
        assert_eq!(timeline[0].properties.get("opacity"), Some("0"));
        assert_eq!(timeline[1].offset, PhaseOffset::END);
    }

    #[test]
    fn test_repeated_offset_rejected() {
        let mut kf = KeyframeDefinition::new("blink");
        kf.push_phase("0%", props(&[("opacity", "0")])).unwrap();
        kf.push_phase("from", props(&[("opacity", "1")])).unwrap();

        let err = kf.validate().unwrap_err();
        assert!(matches!(err, TokenError::MalformedPhase { phase, .. } if phase == "from"));
    }

    #[test]
    fn test_repeated_offset_within_one_key_rejected() {
        let mut kf = KeyframeDefinition::new("blink");
        kf.push_phase("50%, 50%", props(&[("opacity", "0")])).unwrap();
        assert!(kf.validate().is_err());
    }

    #[test]
    fn test_single_phase_rejected() {
        let mut kf = KeyframeDefinition::new("pulse");
        kf.push_phase("50%", props(&[("opacity", ".5")])).unwrap();

        let err = kf.validate().unwrap_err();
        assert!(matches!(err, TokenError::MalformedPhase { keyframes, .. } if keyframes == "pulse"));
    }

    #[test]
    fn test_bad_marker_rejected_on_push() {
        let mut kf = KeyframeDefinition::new("spin");
        let err = kf.push_phase("halfway", PropertySet::new()).unwrap_err();
        assert!(matches!(err, TokenError::MalformedPhase { phase, .. } if phase == "halfway"));
    }
}
