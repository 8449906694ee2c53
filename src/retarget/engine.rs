use glam::Quat;

use super::contribution::evaluate;
use crate::correction::CorrectedFrame;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::mapping::MappingTable;
use crate::target::{TargetPose, TargetRig};

/// Drives a target rig from corrected source frames.
///
/// Owns the target pose between frames: a bone whose rules all lack a
/// source this frame keeps the rotation it had after the previous frame.
/// Frames must therefore be applied in increasing order.
#[derive(Debug, Clone)]
pub struct RetargetEngine {
    table: MappingTable,
    rig: TargetRig,
    pose: TargetPose,
}

impl RetargetEngine {
    pub fn new(table: MappingTable, rig: TargetRig) -> Self {
        let pose = TargetPose::rest(&rig);
        Self { table, rig, pose }
    }

    pub fn rig(&self) -> &TargetRig {
        &self.rig
    }

    pub fn pose(&self) -> &TargetPose {
        &self.pose
    }

    /// Write every mapped target bone for one frame.
    ///
    /// Rules of a bone are layered in declaration order, each composed on
    /// the right of the accumulated rotation. Only rules with a present
    /// source and non-zero influence drive the bone; zero-influence
    /// placeholders never change what is written.
    pub fn apply_frame(
        &mut self,
        frame: &CorrectedFrame,
        diagnostics: &mut Diagnostics,
    ) -> &TargetPose {
        for channel in self.table.channels() {
            let mut rotation = Quat::IDENTITY;
            let mut driven = false;

            for resolved in &channel.rules {
                let rig = frame.rig(resolved.rule.rig);
                let Some(bone) = rig.get(resolved.source_slot) else {
                    continue;
                };

                let contribution = evaluate(&resolved.rule, bone.orientation);
                if resolved.rule.influence > 0.0 {
                    rotation = (rotation * contribution).normalize();
                    driven = true;
                }
            }

            if driven {
                self.pose.set_local_rotation(channel.target, rotation);
            } else if channel.is_active() {
                let target = self.rig.name(channel.target);
                log::debug!("Frame {}: no source for {}, holding", frame.frame, target);
                diagnostics.push(Diagnostic::HeldPose {
                    frame: frame.frame,
                    target: target.to_string(),
                });
            }
        }

        &self.pose
    }

    /// Back to the rest pose, forgetting held rotations
    pub fn reset(&mut self) {
        self.pose = TargetPose::rest(&self.rig);
    }
}
