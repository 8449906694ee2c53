//! JSON format of the landmark stream produced by the pose extractor.
//!
//! One entry per video frame. Each group is an ordered array of points in
//! the extractor's normalized coordinates, `null` when the group was not
//! detected in that frame. Individual points may also be `null`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::names::LandmarkGroup;
use super::store::{FrameLandmarks, LandmarkStore};

/// Default scale from normalized extractor space to scene units
pub const DEFAULT_LANDMARK_SCALE: Vec3 = Vec3::new(60.0, 40.0, 40.0);

type PointsJson = Option<Vec<Option<[f32; 3]>>>;

/// A single frame of holistic tracking output
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HolisticFrameJson {
    #[serde(default)]
    pub pose: PointsJson,
    #[serde(default)]
    pub left_hand: PointsJson,
    #[serde(default)]
    pub right_hand: PointsJson,
    #[serde(default)]
    pub face: PointsJson,
}

impl HolisticFrameJson {
    fn points(&self, group: LandmarkGroup) -> Option<&Vec<Option<[f32; 3]>>> {
        match group {
            LandmarkGroup::Body => self.pose.as_ref(),
            LandmarkGroup::LeftHand => self.left_hand.as_ref(),
            LandmarkGroup::RightHand => self.right_hand.as_ref(),
            LandmarkGroup::Face => self.face.as_ref(),
        }
    }

    /// Convert to named landmarks, scaling every coordinate by `scale`
    pub fn to_frame_landmarks(&self, frame: usize, scale: Vec3) -> FrameLandmarks {
        let mut landmarks = FrameLandmarks::new(frame);

        for group in LandmarkGroup::ALL {
            let Some(points) = self.points(group) else {
                continue;
            };

            if points.len() > group.expected_count() {
                log::warn!(
                    "Frame {}: {:?} has {} points, ignoring those past {}",
                    frame,
                    group,
                    points.len(),
                    group.expected_count()
                );
            }

            for (index, point) in points.iter().enumerate() {
                let (Some(p), Some(name)) = (point, group.landmark_name(index)) else {
                    continue;
                };
                landmarks.insert(group, name, Vec3::from_array(*p) * scale);
            }
        }

        landmarks
    }
}

/// A full extraction pass
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LandmarkStreamJson {
    pub frames: Vec<HolisticFrameJson>,
}

impl LandmarkStreamJson {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_store(&self, scale: Vec3) -> LandmarkStore {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, frame)| frame.to_frame_landmarks(i, scale))
            .collect()
    }
}
