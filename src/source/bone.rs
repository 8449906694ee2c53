use glam::{Quat, Vec3};

/// Axis a bone points along in its rest orientation (head to tail)
pub const CANONICAL_AXIS: Vec3 = Vec3::Y;

/// Directions shorter than this have no usable orientation
pub const DEGENERATE_LENGTH: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneKind {
    /// Copies the start landmark's location and aims at the end landmark
    Stretch,
    /// Copies a landmark's location only
    Anchor,
}

/// A source bone derived for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceBone {
    pub kind: BoneKind,
    /// World position of the bone head
    pub origin: Vec3,
    /// Unit direction head to tail, None for anchors
    pub direction: Option<Vec3>,
    /// Rotation taking [`CANONICAL_AXIS`] onto `direction`
    pub orientation: Quat,
    /// Stretched length, zero for anchors
    pub length: f32,
}

/// Returned by [`SourceBone::aim`] when start and end coincide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degenerate {
    pub length: f32,
}

impl SourceBone {
    pub fn anchor(origin: Vec3) -> Self {
        Self {
            kind: BoneKind::Anchor,
            origin,
            direction: None,
            orientation: Quat::IDENTITY,
            length: 0.0,
        }
    }

    /// Aim a bone from `start` to `end`.
    ///
    /// On a degenerate span the bone keeps its head at `start` with identity
    /// orientation, returned alongside the error so callers can still use it.
    pub fn aim(start: Vec3, end: Vec3) -> Result<Self, (Self, Degenerate)> {
        let delta = end - start;
        let length = delta.length();

        if !length.is_finite() || length < DEGENERATE_LENGTH {
            let fallback = Self {
                kind: BoneKind::Stretch,
                origin: start,
                direction: None,
                orientation: Quat::IDENTITY,
                length: 0.0,
            };
            return Err((fallback, Degenerate { length }));
        }

        let direction = delta / length;
        Ok(Self {
            kind: BoneKind::Stretch,
            origin: start,
            direction: Some(direction),
            orientation: Quat::from_rotation_arc(CANONICAL_AXIS, direction).normalize(),
            length,
        })
    }

    /// World position of the bone tail
    pub fn tail(&self) -> Vec3 {
        self.origin + self.orientation * (CANONICAL_AXIS * self.length)
    }

    /// The same bone seen from a rig rotated by `rotation` about the origin
    pub fn rotated(&self, rotation: Quat) -> Self {
        Self {
            kind: self.kind,
            origin: rotation * self.origin,
            direction: self.direction.map(|d| rotation * d),
            orientation: (rotation * self.orientation).normalize(),
            length: self.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::same_rotation;

    #[test]
    fn test_aim_direction_is_unit_start_to_end() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let end = Vec3::new(4.0, -2.0, 3.0);
        let bone = SourceBone::aim(start, end).unwrap();

        let dir = bone.direction.unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!((dir - Vec3::new(0.6, -0.8, 0.0)).length() < 1e-5);
        assert!((bone.length - 5.0).abs() < 1e-5);
        assert_eq!(bone.origin, start);
    }

    #[test]
    fn test_orientation_maps_canonical_axis() {
        let bone = SourceBone::aim(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();
        let aimed = bone.orientation * CANONICAL_AXIS;

        assert!((aimed - Vec3::NEG_Z).length() < 1e-5);
        assert!((bone.tail() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_antiparallel_direction_is_finite() {
        let bone = SourceBone::aim(Vec3::ZERO, Vec3::NEG_Y).unwrap();
        assert!(bone.orientation.is_finite());
        assert!((bone.orientation * CANONICAL_AXIS - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_falls_back_to_identity() {
        let p = Vec3::new(0.5, 0.5, 0.5);
        let (bone, degenerate) = SourceBone::aim(p, p).unwrap_err();

        assert_eq!(bone.orientation, Quat::IDENTITY);
        assert_eq!(bone.origin, p);
        assert!(bone.direction.is_none());
        assert_eq!(degenerate.length, 0.0);
    }

    #[test]
    fn test_rotated_moves_origin_and_orientation() {
        let bone = SourceBone::aim(Vec3::X, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        let turn = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let rotated = bone.rotated(turn);

        assert!((rotated.origin - Vec3::Y).length() < 1e-5);
        assert!((rotated.direction.unwrap() - Vec3::NEG_X).length() < 1e-5);
        assert!(same_rotation(rotated.orientation, turn * bone.orientation, 1e-6));
    }
}
