//! A single rule's rotation contribution.
//!
//! The source orientation is split into XYZ Euler components, masked and
//! sign-flipped per axis, rebuilt, then weighted by the rule's influence.

use glam::Quat;

use crate::mapping::{AxisMask, MappingRule};
use crate::math::{from_axis_angles, to_axis_angles};

/// Keep only the copied axes of `source`, flipping the inverted ones
pub fn masked_rotation(source: Quat, axes: AxisMask, invert: AxisMask) -> Quat {
    let angles = to_axis_angles(source.normalize());
    from_axis_angles(invert.negate(axes.select(angles)))
}

/// Partial rotation towards `rotation`: identity at 0, `rotation` at 1
pub fn weighted(rotation: Quat, influence: f32) -> Quat {
    if influence >= 1.0 {
        rotation
    } else if influence <= 0.0 {
        Quat::IDENTITY
    } else {
        Quat::IDENTITY.slerp(rotation, influence).normalize()
    }
}

/// Rotation a rule contributes for a source bone orientation
pub fn evaluate(rule: &MappingRule, source: Quat) -> Quat {
    weighted(masked_rotation(source, rule.axes, rule.invert), rule.influence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Axis;
    use crate::math::{same_rotation, ROTATION_ORDER};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOLERANCE: f32 = 1e-5;

    fn random_source(rng: &mut StdRng) -> (f32, f32, f32) {
        // stay clear of the gimbal singularity at y = +-90 degrees
        (
            rng.random_range(-2.5..2.5),
            rng.random_range(-1.2..1.2),
            rng.random_range(-2.5..2.5),
        )
    }

    #[test]
    fn test_full_mask_copies_rotation() {
        let q = Quat::from_euler(ROTATION_ORDER, 0.4, -0.7, 1.3);
        let out = masked_rotation(q, AxisMask::ALL, AxisMask::NONE);
        assert!(same_rotation(out, q, TOLERANCE));
    }

    #[test]
    fn test_masked_y_ignores_y_perturbation() {
        let no_y = AxisMask::ALL.without(Axis::Y);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let (x, y, z) = random_source(&mut rng);
            let dy = rng.random_range(-0.3..0.3);
            let base = masked_rotation(
                Quat::from_euler(ROTATION_ORDER, x, y, z),
                no_y,
                AxisMask::NONE,
            );
            let perturbed = masked_rotation(
                Quat::from_euler(ROTATION_ORDER, x, (y + dy).clamp(-1.4, 1.4), z),
                no_y,
                AxisMask::NONE,
            );
            assert!(same_rotation(base, perturbed, TOLERANCE));
        }
    }

    #[test]
    fn test_masked_y_follows_x_and_z() {
        let no_y = AxisMask::ALL.without(Axis::Y);
        let source = |x: f32, z: f32| Quat::from_euler(ROTATION_ORDER, x, 0.3, z);
        let base = masked_rotation(source(0.2, -0.4), no_y, AxisMask::NONE);

        // Changing X by d changes the output by exactly d about the same axis
        let moved_x = masked_rotation(source(0.5, -0.4), no_y, AxisMask::NONE);
        assert!(!same_rotation(base, moved_x, TOLERANCE));
        let (x0, _, z0) = base.to_euler(ROTATION_ORDER);
        let (x1, _, z1) = moved_x.to_euler(ROTATION_ORDER);
        assert!(((x1 - x0) - 0.3).abs() < 1e-4);
        assert!((z1 - z0).abs() < 1e-4);

        let moved_z = masked_rotation(source(0.2, 0.1), no_y, AxisMask::NONE);
        let (x2, _, z2) = moved_z.to_euler(ROTATION_ORDER);
        assert!((x2 - x0).abs() < 1e-4);
        assert!(((z2 - z0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_invert_matches_negated_source() {
        let mut rng = StdRng::seed_from_u64(23);

        for _ in 0..50 {
            let (x, y, z) = random_source(&mut rng);
            let source = Quat::from_euler(ROTATION_ORDER, x, y, z);
            let negated = Quat::from_euler(ROTATION_ORDER, -x, -y, -z);

            let inverted = masked_rotation(source, AxisMask::ALL, AxisMask::ALL);
            let plain = masked_rotation(negated, AxisMask::ALL, AxisMask::NONE);
            assert!(same_rotation(inverted, plain, TOLERANCE));
        }
    }

    #[test]
    fn test_weighted_endpoints() {
        let q = Quat::from_rotation_y(1.0);

        assert_eq!(weighted(q, 0.0), Quat::IDENTITY);
        assert_eq!(weighted(q, 1.0), q);
        assert!(same_rotation(weighted(q, 0.5), Quat::from_rotation_y(0.5), TOLERANCE));
    }

    #[test]
    fn test_zero_influence_contributes_identity() {
        let rule = MappingRule::new("a", "b").with_influence(0.0);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..10 {
            let (x, y, z) = random_source(&mut rng);
            let source = Quat::from_euler(ROTATION_ORDER, x, y, z);
            assert_eq!(evaluate(&rule, source), Quat::IDENTITY);
        }
    }
}
