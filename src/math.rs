use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Small epsilon value for floating-point comparisons
pub const EPSILON: f32 = 1e-6;

/// Euler order used for axis masking and for authored angles
pub const ROTATION_ORDER: EulerRot = EulerRot::XYZ;

/// Euler angles in degrees for JSON authoring (more intuitive than quaternions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct EulerAngles {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl EulerAngles {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotation about the X axis only
    pub const fn about_x(degrees: f32) -> Self {
        Self::new(degrees, 0.0, 0.0)
    }

    /// Convert to quaternion (XYZ order)
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            ROTATION_ORDER,
            self.x.to_radians(),
            self.y.to_radians(),
            self.z.to_radians(),
        )
    }

    /// Convert from quaternion (XYZ order)
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z) = q.to_euler(ROTATION_ORDER);
        Self {
            x: x.to_degrees(),
            y: y.to_degrees(),
            z: z.to_degrees(),
        }
    }
}

/// Split a rotation into its per-axis components (radians, XYZ order)
#[inline]
pub fn to_axis_angles(q: Quat) -> Vec3 {
    let (x, y, z) = q.to_euler(ROTATION_ORDER);
    Vec3::new(x, y, z)
}

/// Inverse of [`to_axis_angles`]
#[inline]
pub fn from_axis_angles(angles: Vec3) -> Quat {
    Quat::from_euler(ROTATION_ORDER, angles.x, angles.y, angles.z)
}

/// True when both quaternions describe the same rotation (q and -q are equal)
pub fn same_rotation(a: Quat, b: Quat, tolerance: f32) -> bool {
    a.dot(b).abs() >= 1.0 - tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_to_quat() {
        let euler = EulerAngles::about_x(90.0);
        let quat = euler.to_quat();

        let rotated = quat * Vec3::Y;
        assert!(rotated.y.abs() < 0.01, "Y should be ~0, got {}", rotated.y);
        assert!(
            (rotated.z - 1.0).abs() < 0.01,
            "Z should be ~1, got {}",
            rotated.z
        );
    }

    #[test]
    fn test_axis_angles_recompose() {
        let q = Quat::from_euler(ROTATION_ORDER, 0.3, -0.4, 1.1);
        let angles = to_axis_angles(q);

        assert!((angles - Vec3::new(0.3, -0.4, 1.1)).length() < 1e-4);
        assert!(same_rotation(from_axis_angles(angles), q, 1e-6));
    }

    #[test]
    fn test_same_rotation_ignores_sign() {
        let q = Quat::from_rotation_z(0.7);
        assert!(same_rotation(q, -q, 1e-6));
        assert!(!same_rotation(q, Quat::IDENTITY, 1e-6));
    }
}
