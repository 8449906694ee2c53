//! Motion retargeting from tracked landmarks onto an avatar rig.
//!
//! Per frame, landmark positions become an aimed source skeleton, which is
//! rotated into rig space and copied bone by bone onto the target rig through
//! a table of masked, weighted mapping rules.

pub mod config;
pub mod correction;
pub mod diagnostics;
pub mod error;
pub mod landmark;
pub mod mapping;
pub mod math;
pub mod pipeline;
pub mod retarget;
pub mod source;
pub mod target;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod bindings;
        pub use bindings::*;
    }
}

pub use config::RetargetConfig;
pub use correction::GlobalCorrection;
pub use diagnostics::{Diagnostic, Diagnostics, RunSummary};
pub use error::ConfigError;
pub use glam::{Quat, Vec3};
pub use landmark::{FrameLandmarks, Landmark, LandmarkGroup, LandmarkStore};
pub use mapping::{AxisMask, MappingRule, MappingTable};
pub use math::{EulerAngles, EPSILON};
pub use pipeline::{Pipeline, RetargetOutput};
pub use retarget::{RetargetEngine, RetargetTrack};
pub use source::{SourceFrame, SourceTopology, TopologyConfig};
pub use target::{TargetBone, TargetPose, TargetRig};
