use std::collections::HashMap;

use glam::Vec3;

use super::names::LandmarkGroup;

/// A named 3D point detected in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub name: String,
    pub position: Vec3,
    pub group: LandmarkGroup,
}

/// All landmarks detected in a single video frame, looked up by name.
///
/// Landmark names are scene-wide: a connection may join points of different
/// groups (the neck is built from face mesh points, for example).
#[derive(Debug, Clone, Default)]
pub struct FrameLandmarks {
    pub frame: usize,
    points: HashMap<String, Landmark>,
}

impl FrameLandmarks {
    pub fn new(frame: usize) -> Self {
        Self {
            frame,
            points: HashMap::new(),
        }
    }

    /// Add a landmark; a repeated name replaces the earlier sample
    pub fn insert(&mut self, group: LandmarkGroup, name: impl Into<String>, position: Vec3) {
        let name = name.into();
        if let Some(previous) = self.points.get(&name) {
            log::debug!(
                "Frame {}: landmark {} reported by {:?} and {:?}, keeping the latter",
                self.frame,
                name,
                previous.group,
                group
            );
        }
        self.points.insert(
            name.clone(),
            Landmark {
                name,
                position,
                group,
            },
        );
    }

    /// Return self with the landmark added (Functional Set)
    pub fn with(mut self, group: LandmarkGroup, name: impl Into<String>, position: Vec3) -> Self {
        self.insert(group, name, position);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Landmark> {
        self.points.get(name)
    }

    pub fn position(&self, name: &str) -> Option<Vec3> {
        self.points.get(name).map(|l| l.position)
    }

    /// Whether any point of the group was detected this frame
    pub fn has_group(&self, group: LandmarkGroup) -> bool {
        self.points.values().any(|l| l.group == group)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Time-indexed landmark samples for a whole recording.
///
/// Filled once from the extraction pass, read-only while retargeting.
#[derive(Debug, Clone, Default)]
pub struct LandmarkStore {
    frames: Vec<FrameLandmarks>,
}

impl LandmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next frame. Its index is reassigned to its position in the store.
    pub fn push_frame(&mut self, mut frame: FrameLandmarks) -> usize {
        let index = self.frames.len();
        frame.frame = index;
        self.frames.push(frame);
        index
    }

    pub fn frame(&self, index: usize) -> Option<&FrameLandmarks> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[FrameLandmarks] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<FrameLandmarks> for LandmarkStore {
    fn from_iter<I: IntoIterator<Item = FrameLandmarks>>(iter: I) -> Self {
        let mut store = LandmarkStore::new();
        for frame in iter {
            store.push_frame(frame);
        }
        store
    }
}
