//! Whole-clip retargeting: landmarks in, baked track and run summary out.

use glam::Vec3;
use serde::Serialize;

use crate::config::RetargetConfig;
use crate::correction::GlobalCorrection;
use crate::diagnostics::{Diagnostics, RunSummary};
use crate::error::ConfigError;
use crate::landmark::{LandmarkStore, LandmarkStreamJson};
use crate::mapping::MappingTable;
use crate::retarget::{RetargetEngine, RetargetTrack, RetargetTrackJson};
use crate::source::SourceTopology;
use crate::target::TargetRig;

/// Result of one run
#[derive(Debug, Clone)]
pub struct RetargetOutput {
    pub track: RetargetTrack,
    pub summary: RunSummary,
    pub diagnostics: Diagnostics,
}

/// Serializable view of [`RetargetOutput`]
#[derive(Debug, Clone, Serialize)]
pub struct RetargetOutputJson {
    pub track: RetargetTrackJson,
    pub summary: RunSummary,
}

impl RetargetOutput {
    pub fn to_json(&self) -> RetargetOutputJson {
        RetargetOutputJson {
            track: self.track.to_json(),
            summary: self.summary.clone(),
        }
    }
}

/// Validated configuration, ready to process any number of clips
#[derive(Debug, Clone)]
pub struct Pipeline {
    topology: SourceTopology,
    table: MappingTable,
    rig: TargetRig,
    correction: GlobalCorrection,
    landmark_scale: Vec3,
    frame_rate: f32,
}

impl Pipeline {
    pub fn new(config: &RetargetConfig) -> Result<Self, ConfigError> {
        if !config.frame_rate.is_finite() || config.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(config.frame_rate));
        }

        let topology = SourceTopology::new(&config.topology)?;
        let rig = TargetRig::new(config.target_rig.clone())?;
        let table = MappingTable::new(&config.mapping, &topology, &rig)?;

        Ok(Self {
            topology,
            table,
            rig,
            correction: config.correction,
            landmark_scale: config.landmark_scale,
            frame_rate: config.frame_rate,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(&RetargetConfig::from_json(json)?)
    }

    pub fn topology(&self) -> &SourceTopology {
        &self.topology
    }

    pub fn rig(&self) -> &TargetRig {
        &self.rig
    }

    /// Retarget every frame of `store` in order, starting from the rest pose.
    ///
    /// Per-frame problems never abort the run; they are collected into the
    /// returned diagnostics and summary.
    pub fn run(&self, store: &LandmarkStore) -> RetargetOutput {
        let mut engine = RetargetEngine::new(self.table.clone(), self.rig.clone());
        let mut track = RetargetTrack::new(&self.rig, self.frame_rate);
        let mut diagnostics = Diagnostics::new();

        for landmarks in store.frames() {
            let source = self.topology.build_frame(landmarks, &mut diagnostics);
            let corrected = self.correction.apply(&source);
            track.push_pose(engine.apply_frame(&corrected, &mut diagnostics));
        }

        let mut summary = diagnostics.summary(store.len());
        summary.count_groups(store);
        if summary.is_clean() {
            log::info!("Retargeted {} frames", store.len());
        } else {
            log::warn!(
                "Retargeted {} frames: {} missing, {} degenerate, {} held over {} frames",
                store.len(),
                summary.missing_landmarks,
                summary.degenerate_bones,
                summary.held_poses,
                summary.affected_frames.len()
            );
        }

        RetargetOutput {
            track,
            summary,
            diagnostics,
        }
    }

    /// Parse a landmark stream, scale it and run it
    pub fn run_json(&self, landmarks_json: &str) -> Result<RetargetOutput, ConfigError> {
        let stream = LandmarkStreamJson::from_json(landmarks_json)?;
        Ok(self.run(&stream.to_store(self.landmark_scale)))
    }
}
