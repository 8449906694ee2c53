//! MediaPipe Holistic landmark naming.
//!
//! Body points use the pose model names, hand points use the hand model names
//! with an `L`/`R` prefix, face mesh points are named by their numeric index.

use serde::{Deserialize, Serialize};

pub const POSE_LANDMARK_COUNT: usize = 33;
pub const HAND_LANDMARK_COUNT: usize = 21;
pub const FACE_LANDMARK_COUNT: usize = 468;

pub const LEFT_HAND_PREFIX: &str = "L";
pub const RIGHT_HAND_PREFIX: &str = "R";

pub const POSE_LANDMARK_NAMES: [&str; POSE_LANDMARK_COUNT] = [
    "NOSE",
    "LEFT_EYE_INNER",
    "LEFT_EYE",
    "LEFT_EYE_OUTER",
    "RIGHT_EYE_INNER",
    "RIGHT_EYE",
    "RIGHT_EYE_OUTER",
    "LEFT_EAR",
    "RIGHT_EAR",
    "MOUTH_LEFT",
    "MOUTH_RIGHT",
    "LEFT_SHOULDER",
    "RIGHT_SHOULDER",
    "LEFT_ELBOW",
    "RIGHT_ELBOW",
    "LEFT_WRIST",
    "RIGHT_WRIST",
    "LEFT_PINKY",
    "RIGHT_PINKY",
    "LEFT_INDEX",
    "RIGHT_INDEX",
    "LEFT_THUMB",
    "RIGHT_THUMB",
    "LEFT_HIP",
    "RIGHT_HIP",
    "LEFT_KNEE",
    "RIGHT_KNEE",
    "LEFT_ANKLE",
    "RIGHT_ANKLE",
    "LEFT_HEEL",
    "RIGHT_HEEL",
    "LEFT_FOOT_INDEX",
    "RIGHT_FOOT_INDEX",
];

pub const HAND_LANDMARK_NAMES: [&str; HAND_LANDMARK_COUNT] = [
    "WRIST",
    "THUMB_CMC",
    "THUMB_MCP",
    "THUMB_IP",
    "THUMB_TIP",
    "INDEX_FINGER_MCP",
    "INDEX_FINGER_PIP",
    "INDEX_FINGER_DIP",
    "INDEX_FINGER_TIP",
    "MIDDLE_FINGER_MCP",
    "MIDDLE_FINGER_PIP",
    "MIDDLE_FINGER_DIP",
    "MIDDLE_FINGER_TIP",
    "RING_FINGER_MCP",
    "RING_FINGER_PIP",
    "RING_FINGER_DIP",
    "RING_FINGER_TIP",
    "PINKY_MCP",
    "PINKY_PIP",
    "PINKY_DIP",
    "PINKY_TIP",
];

/// Anatomical group a landmark was detected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkGroup {
    Body,
    LeftHand,
    RightHand,
    Face,
}

impl LandmarkGroup {
    pub const COUNT: usize = 4;

    pub const ALL: [LandmarkGroup; Self::COUNT] = [
        LandmarkGroup::Body,
        LandmarkGroup::LeftHand,
        LandmarkGroup::RightHand,
        LandmarkGroup::Face,
    ];

    /// Number of points the extractor reports for this group
    pub const fn expected_count(self) -> usize {
        match self {
            LandmarkGroup::Body => POSE_LANDMARK_COUNT,
            LandmarkGroup::LeftHand | LandmarkGroup::RightHand => HAND_LANDMARK_COUNT,
            LandmarkGroup::Face => FACE_LANDMARK_COUNT,
        }
    }

    /// Scene-wide name of the landmark at `index`, or None past the group's table
    pub fn landmark_name(self, index: usize) -> Option<String> {
        match self {
            LandmarkGroup::Body => POSE_LANDMARK_NAMES.get(index).map(|n| n.to_string()),
            LandmarkGroup::LeftHand => HAND_LANDMARK_NAMES
                .get(index)
                .map(|n| format!("{LEFT_HAND_PREFIX}{n}")),
            LandmarkGroup::RightHand => HAND_LANDMARK_NAMES
                .get(index)
                .map(|n| format!("{RIGHT_HAND_PREFIX}{n}")),
            LandmarkGroup::Face => (index < FACE_LANDMARK_COUNT).then(|| index.to_string()),
        }
    }
}
