use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::source::SourceRig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Axis::X => 1,
            Axis::Y => 1 << 1,
            Axis::Z => 1 << 2,
        }
    }
}

/// Set of rotation axes. Bit i corresponds to X, Y, Z in that order.
///
/// Authored as a string of axis letters: `"xyz"`, `"xz"`, `""`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct AxisMask(u8);

impl AxisMask {
    pub const NONE: AxisMask = AxisMask(0);
    pub const ALL: AxisMask = AxisMask(0b111);

    pub fn all() -> Self {
        Self::ALL
    }

    #[inline]
    pub fn contains(self, axis: Axis) -> bool {
        self.0 & axis.bit() != 0
    }

    pub fn with(self, axis: Axis) -> Self {
        Self(self.0 | axis.bit())
    }

    pub fn without(self, axis: Axis) -> Self {
        Self(self.0 & !axis.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every axis of `other` is also in self
    pub fn covers(self, other: AxisMask) -> bool {
        other.0 & !self.0 == 0
    }

    /// Zero the components of `angles` that are not in the mask
    pub fn select(self, angles: Vec3) -> Vec3 {
        Vec3::new(
            if self.contains(Axis::X) { angles.x } else { 0.0 },
            if self.contains(Axis::Y) { angles.y } else { 0.0 },
            if self.contains(Axis::Z) { angles.z } else { 0.0 },
        )
    }

    /// Negate the components of `angles` that are in the mask
    pub fn negate(self, angles: Vec3) -> Vec3 {
        let sign = |axis| if self.contains(axis) { -1.0 } else { 1.0 };
        angles * Vec3::new(sign(Axis::X), sign(Axis::Y), sign(Axis::Z))
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut mask = AxisMask::NONE;
        for c in text.chars() {
            let axis = match c.to_ascii_lowercase() {
                'x' => Axis::X,
                'y' => Axis::Y,
                'z' => Axis::Z,
                _ => return Err(ConfigError::MalformedAxisMask(text.to_string())),
            };
            if mask.contains(axis) {
                return Err(ConfigError::MalformedAxisMask(text.to_string()));
            }
            mask = mask.with(axis);
        }
        Ok(mask)
    }
}

impl fmt::Display for AxisMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (axis, letter) in Axis::ALL.iter().zip(["x", "y", "z"]) {
            if self.contains(*axis) {
                f.write_str(letter)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AxisMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisMask({:?})", self.to_string())
    }
}

impl TryFrom<String> for AxisMask {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AxisMask::parse(&value)
    }
}

impl From<AxisMask> for String {
    fn from(mask: AxisMask) -> Self {
        mask.to_string()
    }
}

fn full_influence() -> f32 {
    1.0
}

/// Copy the rotation of one source bone onto one target bone.
///
/// Rules are applied in declaration order; later rules on the same target
/// bone layer on top of earlier ones.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MappingRule {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub rig: SourceRig,
    /// Rotation axes copied from the source
    #[serde(default = "AxisMask::all")]
    pub axes: AxisMask,
    /// Copied axes whose sign is flipped
    #[serde(default)]
    pub invert: AxisMask,
    /// Blend weight in [0, 1]; 0 keeps the rule as a documented placeholder
    #[serde(default = "full_influence")]
    pub influence: f32,
}

impl MappingRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            rig: SourceRig::Body,
            axes: AxisMask::ALL,
            invert: AxisMask::NONE,
            influence: 1.0,
        }
    }

    pub fn on_rig(mut self, rig: SourceRig) -> Self {
        self.rig = rig;
        self
    }

    pub fn with_axes(mut self, axes: AxisMask) -> Self {
        self.axes = axes;
        self
    }

    pub fn inverted(mut self, invert: AxisMask) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_influence(mut self, influence: f32) -> Self {
        self.influence = influence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_parse_and_display() {
        let mask = AxisMask::parse("xz").unwrap();
        assert!(mask.contains(Axis::X));
        assert!(!mask.contains(Axis::Y));
        assert!(mask.contains(Axis::Z));
        assert_eq!(mask.to_string(), "xz");

        assert_eq!(AxisMask::parse("ZYX").unwrap(), AxisMask::ALL);
        assert_eq!(AxisMask::parse("").unwrap(), AxisMask::NONE);
    }

    #[test]
    fn test_malformed_masks() {
        for text in ["w", "xx", "x y", "xyz1"] {
            assert!(
                matches!(AxisMask::parse(text), Err(ConfigError::MalformedAxisMask(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_select_and_negate() {
        let angles = Vec3::new(1.0, 2.0, 3.0);
        let no_y = AxisMask::ALL.without(Axis::Y);

        assert_eq!(no_y.select(angles), Vec3::new(1.0, 0.0, 3.0));
        assert_eq!(no_y.negate(angles), Vec3::new(-1.0, 2.0, -3.0));
        assert!(AxisMask::ALL.covers(no_y));
        assert!(!no_y.covers(AxisMask::ALL));
    }

    #[test]
    fn test_rule_parsing_defaults() {
        let json = r#"[
            { "source": "LEFT_ELBOW", "target": "lShldrBend" },
            {
                "source": "NECK", "target": "neckUpper",
                "rig": "head", "axes": "xz", "influence": 0.95
            }
        ]"#;

        let rules: Vec<MappingRule> = serde_json::from_str(json).unwrap();
        assert_eq!(rules[0], MappingRule::new("LEFT_ELBOW", "lShldrBend"));
        assert_eq!(
            rules[1],
            MappingRule::new("NECK", "neckUpper")
                .on_rig(SourceRig::Head)
                .with_axes(AxisMask::ALL.without(Axis::Y))
                .with_influence(0.95)
        );
    }

    #[test]
    fn test_rule_rejects_bad_mask() {
        let json = r#"{ "source": "A", "target": "B", "invert": "q" }"#;
        assert!(serde_json::from_str::<MappingRule>(json).is_err());
    }
}
