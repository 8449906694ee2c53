//! Recoverable per-frame problems and the run summary built from them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::landmark::{LandmarkGroup, LandmarkStore};

/// A recoverable problem met while processing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An endpoint landmark was not detected; the source bone is omitted.
    MissingLandmark {
        frame: usize,
        bone: String,
        landmark: String,
    },
    /// Start and end landmarks coincide; the source bone uses identity orientation.
    DegenerateGeometry {
        frame: usize,
        bone: String,
        length: f32,
    },
    /// No rule of a target bone had a source this frame; the previous rotation is kept.
    HeldPose { frame: usize, target: String },
}

impl Diagnostic {
    pub fn frame(&self) -> usize {
        match self {
            Diagnostic::MissingLandmark { frame, .. }
            | Diagnostic::DegenerateGeometry { frame, .. }
            | Diagnostic::HeldPose { frame, .. } => *frame,
        }
    }
}

/// Collector passed through the per-frame steps
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate everything recorded so far for operator inspection
    pub fn summary(&self, frame_count: usize) -> RunSummary {
        let mut summary = RunSummary {
            frames: frame_count,
            ..Default::default()
        };

        for entry in &self.entries {
            summary.affected_frames.insert(entry.frame());
            match entry {
                Diagnostic::MissingLandmark { bone, .. } => {
                    summary.missing_landmarks += 1;
                    summary.source_bones.entry(bone.clone()).or_default().missing += 1;
                }
                Diagnostic::DegenerateGeometry { bone, .. } => {
                    summary.degenerate_bones += 1;
                    summary
                        .source_bones
                        .entry(bone.clone())
                        .or_default()
                        .degenerate += 1;
                }
                Diagnostic::HeldPose { target, .. } => {
                    summary.held_poses += 1;
                    *summary.held_targets.entry(target.clone()).or_default() += 1;
                }
            }
        }

        summary
    }
}

/// Per source bone counts of skipped or degraded frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoneIssues {
    pub missing: usize,
    pub degenerate: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: usize,
    pub missing_landmarks: usize,
    pub degenerate_bones: usize,
    pub held_poses: usize,
    pub affected_frames: BTreeSet<usize>,
    pub source_bones: BTreeMap<String, BoneIssues>,
    pub held_targets: BTreeMap<String, usize>,
    /// Frames in which each landmark group was detected at all
    pub detected_groups: BTreeMap<LandmarkGroup, usize>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.affected_frames.is_empty()
    }

    /// Record per-group detection counts over `store`
    pub fn count_groups(&mut self, store: &LandmarkStore) {
        for group in LandmarkGroup::ALL {
            let frames = store.frames().iter().filter(|f| f.has_group(group)).count();
            self.detected_groups.insert(group, frames);
        }
    }
}
