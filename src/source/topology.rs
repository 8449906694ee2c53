//! Source skeleton topology and per-frame construction.
//!
//! Topology is declared once from configuration ([`SourceTopology::new`]),
//! which validates it and allocates one named slot per bone. Each frame then
//! only fills those slots from the frame's landmarks
//! ([`SourceTopology::build_frame`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::bone::{BoneKind, SourceBone};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ConfigError;
use crate::landmark::FrameLandmarks;

/// Two landmarks joined into one aimed bone
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LandmarkConnection {
    pub start: String,
    pub end: String,
    /// Bone name; defaults to the (prefixed) end landmark name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bone: Option<String>,
}

impl LandmarkConnection {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            bone: None,
        }
    }

    pub fn named(
        start: impl Into<String>,
        end: impl Into<String>,
        bone: impl Into<String>,
    ) -> Self {
        Self {
            bone: Some(bone.into()),
            ..Self::new(start, end)
        }
    }
}

/// Connections sharing a landmark name prefix (one per hand, for example)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionGroup {
    #[serde(default)]
    pub prefix: String,
    pub connections: Vec<LandmarkConnection>,
}

impl ConnectionGroup {
    pub fn new(prefix: impl Into<String>, connections: Vec<LandmarkConnection>) -> Self {
        Self {
            prefix: prefix.into(),
            connections,
        }
    }
}

/// Configured shape of the source skeleton
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub connections: Vec<ConnectionGroup>,
    /// Single-landmark bones, named after their landmark
    #[serde(default)]
    pub anchors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotSource {
    Stretch { start: String, end: String },
    Anchor { landmark: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoneSlot {
    name: String,
    source: SlotSource,
}

/// Validated source skeleton with one slot per bone
#[derive(Debug, Clone)]
pub struct SourceTopology {
    slots: Vec<BoneSlot>,
    index: HashMap<String, usize>,
}

impl SourceTopology {
    pub fn new(config: &TopologyConfig) -> Result<Self, ConfigError> {
        let mut topology = Self {
            slots: Vec::new(),
            index: HashMap::new(),
        };

        for group in &config.connections {
            for connection in &group.connections {
                let start = format!("{}{}", group.prefix, connection.start);
                let end = format!("{}{}", group.prefix, connection.end);
                let name = connection.bone.clone().unwrap_or_else(|| end.clone());
                if connection.start.is_empty() || connection.end.is_empty() {
                    return Err(ConfigError::EmptyLandmarkName { bone: name });
                }
                topology.declare(name, SlotSource::Stretch { start, end })?;
            }
        }

        for landmark in &config.anchors {
            if landmark.is_empty() {
                return Err(ConfigError::EmptyLandmarkName {
                    bone: landmark.clone(),
                });
            }
            topology.declare(
                landmark.clone(),
                SlotSource::Anchor {
                    landmark: landmark.clone(),
                },
            )?;
        }

        log::info!(
            "Source topology declared: {} bones ({} anchors)",
            topology.slots.len(),
            config.anchors.len()
        );
        Ok(topology)
    }

    fn declare(&mut self, name: String, source: SlotSource) -> Result<(), ConfigError> {
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateBone(name));
        }
        self.index.insert(name.clone(), self.slots.len());
        self.slots.push(BoneSlot { name, source });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(|s| s.name.as_str())
    }

    pub fn kind(&self, slot: usize) -> Option<BoneKind> {
        self.slots.get(slot).map(|s| match s.source {
            SlotSource::Stretch { .. } => BoneKind::Stretch,
            SlotSource::Anchor { .. } => BoneKind::Anchor,
        })
    }

    /// Derive every bone for one frame.
    ///
    /// Bones whose landmarks are missing are left empty; degenerate spans
    /// fall back to identity orientation. Both are reported to `diagnostics`.
    pub fn build_frame(
        &self,
        landmarks: &FrameLandmarks,
        diagnostics: &mut Diagnostics,
    ) -> SourceFrame {
        let frame = landmarks.frame;
        let mut bones = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let bone = match &slot.source {
                SlotSource::Anchor { landmark } => match landmarks.position(landmark) {
                    Some(p) => Some(SourceBone::anchor(p)),
                    None => {
                        report_missing(diagnostics, frame, &slot.name, landmark);
                        None
                    }
                },
                SlotSource::Stretch { start, end } => {
                    match (landmarks.position(start), landmarks.position(end)) {
                        (Some(s), Some(e)) => Some(match SourceBone::aim(s, e) {
                            Ok(bone) => bone,
                            Err((fallback, degenerate)) => {
                                log::warn!(
                                    "Frame {}: bone {} has zero length ({} -> {}), using identity",
                                    frame,
                                    slot.name,
                                    start,
                                    end
                                );
                                diagnostics.push(Diagnostic::DegenerateGeometry {
                                    frame,
                                    bone: slot.name.clone(),
                                    length: degenerate.length,
                                });
                                fallback
                            }
                        }),
                        (s, _) => {
                            let missing = if s.is_none() { start } else { end };
                            report_missing(diagnostics, frame, &slot.name, missing);
                            None
                        }
                    }
                }
            };
            bones.push(bone);
        }

        SourceFrame { frame, bones }
    }
}

fn report_missing(diagnostics: &mut Diagnostics, frame: usize, bone: &str, landmark: &str) {
    // Occlusion is routine (hands leave the picture), keep this quiet
    log::debug!("Frame {}: landmark {} missing, skipping bone {}", frame, landmark, bone);
    diagnostics.push(Diagnostic::MissingLandmark {
        frame,
        bone: bone.to_string(),
        landmark: landmark.to_string(),
    });
}

/// The source skeleton for one frame, indexed by topology slot
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFrame {
    pub frame: usize,
    bones: Vec<Option<SourceBone>>,
}

impl SourceFrame {
    pub fn get(&self, slot: usize) -> Option<&SourceBone> {
        self.bones.get(slot).and_then(Option::as_ref)
    }

    /// Bones present this frame with their slot
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SourceBone)> {
        self.bones
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (i, b)))
    }

    pub fn present_count(&self) -> usize {
        self.bones.iter().filter(|b| b.is_some()).count()
    }

    /// Apply `f` to every present bone
    pub fn map_bones(&self, f: impl Fn(&SourceBone) -> SourceBone) -> SourceFrame {
        SourceFrame {
            frame: self.frame,
            bones: self.bones.iter().map(|b| b.as_ref().map(&f)).collect(),
        }
    }
}
