use glam::Quat;

use super::rig::TargetRig;

/// Local rotation of every target rig bone (relative to parent).
///
/// Starts at the rest pose (identity everywhere). The retargeting engine is
/// its only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPose {
    local_rotations: Vec<Quat>,
}

impl TargetPose {
    pub fn rest(rig: &TargetRig) -> Self {
        Self {
            local_rotations: vec![Quat::IDENTITY; rig.len()],
        }
    }

    pub fn local_rotation(&self, bone: usize) -> Quat {
        self.local_rotations
            .get(bone)
            .copied()
            .unwrap_or(Quat::IDENTITY)
    }

    pub fn set_local_rotation(&mut self, bone: usize, rotation: Quat) {
        if let Some(slot) = self.local_rotations.get_mut(bone) {
            *slot = rotation;
        }
    }

    /// Return self with the bone rotation replaced (Functional Set)
    pub fn with_rotation(mut self, bone: usize, rotation: Quat) -> Self {
        self.set_local_rotation(bone, rotation);
        self
    }

    pub fn local_rotations(&self) -> &[Quat] {
        &self.local_rotations
    }
}
