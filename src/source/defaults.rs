//! Source topology for MediaPipe Holistic landmarks.

use super::topology::{ConnectionGroup, LandmarkConnection, TopologyConfig};
use crate::landmark::{LEFT_HAND_PREFIX, RIGHT_HAND_PREFIX};

/// Arms, hands, collar pair and the neck/head span built from face points
pub fn pose_connections() -> Vec<LandmarkConnection> {
    vec![
        LandmarkConnection::new("LEFT_SHOULDER", "LEFT_ELBOW"),
        LandmarkConnection::new("LEFT_ELBOW", "LEFT_WRIST"),
        LandmarkConnection::new("RIGHT_SHOULDER", "RIGHT_ELBOW"),
        LandmarkConnection::new("RIGHT_ELBOW", "RIGHT_WRIST"),
        // hand bones
        LandmarkConnection::new("RIGHT_WRIST", "RIGHT_INDEX"),
        LandmarkConnection::new("LEFT_WRIST", "LEFT_INDEX"),
        // shoulder line, once per direction, for the collar bones
        LandmarkConnection::new("LEFT_SHOULDER", "RIGHT_SHOULDER"),
        LandmarkConnection::new("RIGHT_SHOULDER", "LEFT_SHOULDER"),
        // below jaw to upper lip
        LandmarkConnection::named("152", "0", "NECK"),
        // upper lip to mid nose bridge
        LandmarkConnection::named("0", "6", "HEAD"),
        // below jaw to top of face
        LandmarkConnection::named("152", "10", "HEAD_NECK"),
    ]
}

/// Finger chains, shared by both hands through the name prefix
pub fn hand_connections() -> Vec<LandmarkConnection> {
    let mut connections = chain(&["WRIST", "THUMB_MCP", "THUMB_IP", "THUMB_TIP"]);
    for finger in ["INDEX_FINGER", "MIDDLE_FINGER", "RING_FINGER", "PINKY"] {
        let joints: Vec<String> = ["MCP", "PIP", "DIP", "TIP"]
            .iter()
            .map(|j| format!("{finger}_{j}"))
            .collect();
        let mut names = vec!["WRIST"];
        names.extend(joints.iter().map(String::as_str));
        connections.extend(chain(&names));
    }
    connections
}

fn chain(names: &[&str]) -> Vec<LandmarkConnection> {
    names
        .windows(2)
        .map(|w| LandmarkConnection::new(w[0], w[1]))
        .collect()
}

/// Eyelid spans; face bones are built but not mapped by default
pub fn face_connections() -> Vec<LandmarkConnection> {
    let right_lids = ["133", "33", "159", "160", "158", "144", "153", "145"];
    let left_lids = ["362", "263", "386", "387", "385", "373", "380", "374"];

    let mut connections: Vec<LandmarkConnection> = right_lids
        .iter()
        .map(|p| LandmarkConnection::new("RIGHT_EYE", *p))
        .chain(left_lids.iter().map(|p| LandmarkConnection::new("LEFT_EYE", *p)))
        .collect();

    connections.extend([
        LandmarkConnection::new("RIGHT_EYE", "RIGHT_EYE_INNER"),
        LandmarkConnection::new("RIGHT_EYE", "RIGHT_EYE_OUTER"),
        LandmarkConnection::new("LEFT_EYE", "LEFT_EYE_INNER"),
        LandmarkConnection::new("LEFT_EYE", "LEFT_EYE_OUTER"),
    ]);
    connections
}

/// Face mesh points used as location-only anchors
pub const FACE_ANCHORS: [u16; 48] = [
    // eyebrows (right, left), center brow
    107, 105, 70, 336, 334, 300, 9,
    // nose bridge, tip, nostrils
    6, 4, 218, 438,
    // nasolabial middle, upper, lower
    36, 266, 47, 277, 202, 422,
    // squint inner, outer
    22, 252, 110, 339,
    // cheeks
    117, 187, 346, 411,
    // lip below nose, nasolabial crease, nasolabial mouth corner
    167, 393, 92, 322, 216, 436,
    // lip corners, upper and lower middle
    57, 287, 0, 17,
    // lip upper inner, outer; lower outer, inner
    39, 269, 40, 270, 321, 91, 84, 314,
    // lip below, chin, below jaw, jaw clench
    18, 175, 152, 177, 401,
];

pub const POSE_ANCHORS: [&str; 2] = ["RIGHT_EYE", "LEFT_EYE"];

pub fn holistic_topology() -> TopologyConfig {
    let anchors = FACE_ANCHORS
        .iter()
        .map(|id| id.to_string())
        .chain(POSE_ANCHORS.iter().map(|n| n.to_string()))
        .collect();

    TopologyConfig {
        connections: vec![
            ConnectionGroup::new("", pose_connections()),
            ConnectionGroup::new(LEFT_HAND_PREFIX, hand_connections()),
            ConnectionGroup::new(RIGHT_HAND_PREFIX, hand_connections()),
            ConnectionGroup::new("", face_connections()),
        ],
        anchors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceTopology;

    #[test]
    fn test_holistic_topology_is_valid() {
        let topology = SourceTopology::new(&holistic_topology()).unwrap();

        // 11 pose + 2 * 19 hand + 20 face connections, 48 + 2 anchors
        assert_eq!(topology.len(), 11 + 38 + 20 + 50);
        assert!(topology.slot("NECK").is_some());
        assert!(topology.slot("LTHUMB_TIP").is_some());
        assert!(topology.slot("RPINKY_MCP").is_some());
        assert!(topology.slot("152").is_some());
    }

    #[test]
    fn test_hand_chain_shape() {
        let connections = hand_connections();
        assert_eq!(connections.len(), 19);
        assert_eq!(connections[0], LandmarkConnection::new("WRIST", "THUMB_MCP"));
        assert_eq!(
            connections[3],
            LandmarkConnection::new("WRIST", "INDEX_FINGER_MCP")
        );
    }
}
