//! Bone correspondence for the Genesis 8 avatar.
//!
//! Influence values are rig-specific calibration found by eye.

use super::rule::{Axis, AxisMask, MappingRule};
use crate::source::SourceRig;

/// Forearm bends overshoot slightly at full strength
pub const FOREARM_INFLUENCE: f32 = 0.95;

pub const NECK_UPPER_INFLUENCE: f32 = 0.95;

/// Collar rules are kept in the table but currently disabled
pub const COLLAR_INFLUENCE: f32 = 0.0;

pub fn pose_rules() -> Vec<MappingRule> {
    vec![
        MappingRule::new("LEFT_ELBOW", "lShldrBend"),
        MappingRule::new("LEFT_WRIST", "lForearmBend").with_influence(FOREARM_INFLUENCE),
        MappingRule::new("RIGHT_ELBOW", "rShldrBend"),
        MappingRule::new("RIGHT_WRIST", "rForearmBend").with_influence(FOREARM_INFLUENCE),
        MappingRule::new("RIGHT_INDEX", "rHand"),
        MappingRule::new("LEFT_INDEX", "lHand"),
    ]
}

/// Finger rules for one hand. `source_prefix` is the landmark prefix,
/// `target_prefix` the avatar's side letter.
pub fn hand_rules(source_prefix: &str, target_prefix: &str) -> Vec<MappingRule> {
    const FINGERS: [(&str, &[&str]); 5] = [
        ("THUMB", &["MCP:Thumb1", "IP:Thumb2", "TIP:Thumb3"]),
        (
            "INDEX_FINGER",
            &["MCP:Carpal1", "PIP:Index1", "DIP:Index2", "TIP:Index3"],
        ),
        (
            "MIDDLE_FINGER",
            &["MCP:Carpal2", "PIP:Mid1", "DIP:Mid2", "TIP:Mid3"],
        ),
        (
            "RING_FINGER",
            &["MCP:Carpal3", "PIP:Ring1", "DIP:Ring2", "TIP:Ring3"],
        ),
        (
            "PINKY",
            &["MCP:Carpal4", "PIP:Pinky1", "DIP:Pinky2", "TIP:Pinky3"],
        ),
    ];

    FINGERS
        .iter()
        .flat_map(|(finger, joints)| {
            joints.iter().filter_map(move |pair| {
                let (joint, bone) = pair.split_once(':')?;
                Some(MappingRule::new(
                    format!("{source_prefix}{finger}_{joint}"),
                    format!("{target_prefix}{bone}"),
                ))
            })
        })
        .collect()
}

/// Spine and neck bones all follow the jaw-to-lip span; twist is not copied.
pub fn neck_rules() -> Vec<MappingRule> {
    let no_twist = AxisMask::ALL.without(Axis::Y);
    let neck = |target: &str| {
        MappingRule::new("NECK", target)
            .on_rig(SourceRig::Head)
            .with_axes(no_twist)
    };

    vec![
        neck("abdomenLower"),
        neck("abdomenUpper"),
        neck("chestLower"),
        neck("chestUpper"),
        neck("neckUpper").with_influence(NECK_UPPER_INFLUENCE),
        neck("neckLower"),
        MappingRule::new("HEAD", "head")
            .on_rig(SourceRig::Head)
            .with_axes(no_twist),
    ]
}

/// Each collar is driven by the shoulder line pointing towards it, mirrored.
pub fn collar_rules() -> Vec<MappingRule> {
    vec![
        MappingRule::new("RIGHT_SHOULDER", "lCollar")
            .inverted(AxisMask::ALL)
            .with_influence(COLLAR_INFLUENCE),
        MappingRule::new("LEFT_SHOULDER", "rCollar")
            .inverted(AxisMask::ALL)
            .with_influence(COLLAR_INFLUENCE),
    ]
}

pub fn genesis8_rules() -> Vec<MappingRule> {
    let mut rules = pose_rules();
    rules.extend(hand_rules("L", "l"));
    rules.extend(hand_rules("R", "r"));
    rules.extend(neck_rules());
    rules.extend(collar_rules());
    rules
}
