//! Global orientation correction between capture space and rig space.
//!
//! The source skeleton exists twice: the body rig (body and hands) and the
//! head rig (neck, head and face). Each gets its own fixed root rotation
//! before any mapping rule reads from it.

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::math::EulerAngles;
use crate::source::{SourceFrame, SourceRig};

/// Body rig root rotation about X for the Genesis 8 avatar (degrees)
pub const BODY_CORRECTION_X_DEG: f32 = -210.0;

/// Head rig root rotation about X for the Genesis 8 avatar (degrees)
pub const HEAD_CORRECTION_X_DEG: f32 = -180.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GlobalCorrection {
    #[serde(default)]
    pub body: EulerAngles,
    #[serde(default)]
    pub head: EulerAngles,
}

impl Default for GlobalCorrection {
    fn default() -> Self {
        Self {
            body: EulerAngles::about_x(BODY_CORRECTION_X_DEG),
            head: EulerAngles::about_x(HEAD_CORRECTION_X_DEG),
        }
    }
}

impl GlobalCorrection {
    /// No correction on either rig
    pub fn identity() -> Self {
        Self {
            body: EulerAngles::default(),
            head: EulerAngles::default(),
        }
    }

    pub fn rotation(&self, rig: SourceRig) -> Quat {
        match rig {
            SourceRig::Body => self.body.to_quat(),
            SourceRig::Head => self.head.to_quat(),
        }
    }

    /// Rotate both rig copies of `frame` about their root
    pub fn apply(&self, frame: &SourceFrame) -> CorrectedFrame {
        let body = self.rotation(SourceRig::Body);
        let head = self.rotation(SourceRig::Head);

        CorrectedFrame {
            frame: frame.frame,
            body: frame.map_bones(|b| b.rotated(body)),
            head: frame.map_bones(|b| b.rotated(head)),
        }
    }
}

/// A source frame as seen from both corrected rigs
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedFrame {
    pub frame: usize,
    body: SourceFrame,
    head: SourceFrame,
}

impl CorrectedFrame {
    pub fn rig(&self, rig: SourceRig) -> &SourceFrame {
        match rig {
            SourceRig::Body => &self.body,
            SourceRig::Head => &self.head,
        }
    }
}
