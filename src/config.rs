//! Run configuration, loaded once before any frame is processed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::correction::GlobalCorrection;
use crate::error::ConfigError;
use crate::landmark::DEFAULT_LANDMARK_SCALE;
use crate::mapping::defaults::genesis8_rules;
use crate::mapping::MappingRule;
use crate::retarget::DEFAULT_FRAME_RATE;
use crate::source::defaults::holistic_topology;
use crate::source::TopologyConfig;
use crate::target::{genesis8_bones, TargetBone};

/// Everything a retargeting run needs besides the landmarks.
///
/// Missing JSON fields fall back to the Genesis 8 avatar setup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetargetConfig {
    pub version: u32,
    /// Per-axis factor from extractor coordinates to scene units
    pub landmark_scale: Vec3,
    pub frame_rate: f32,
    pub topology: TopologyConfig,
    /// Rules in application order
    pub mapping: Vec<MappingRule>,
    pub correction: GlobalCorrection,
    pub target_rig: Vec<TargetBone>,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            landmark_scale: DEFAULT_LANDMARK_SCALE,
            frame_rate: DEFAULT_FRAME_RATE,
            topology: holistic_topology(),
            mapping: genesis8_rules(),
            correction: GlobalCorrection::default(),
            target_rig: genesis8_bones(),
        }
    }
}

impl RetargetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
