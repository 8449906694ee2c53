//! Retargeted motion: one local rotation per target bone per frame.

use std::collections::BTreeMap;

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::math::EulerAngles;
use crate::target::{TargetPose, TargetRig};

pub const DEFAULT_FRAME_RATE: f32 = 24.0;

/// Baked rotations for every bone of the target rig, frame by frame
#[derive(Debug, Clone, PartialEq)]
pub struct RetargetTrack {
    pub frame_rate: f32,
    bones: Vec<String>,
    frames: Vec<Vec<Quat>>,
}

/// JSON format for one frame: bone name -> local rotation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackFrameJson {
    pub frame: usize,
    pub rotations: BTreeMap<String, EulerAngles>,
}

/// JSON format for a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetargetTrackJson {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    pub bones: Vec<String>,
    pub frames: Vec<TrackFrameJson>,
}

fn default_version() -> u32 {
    1
}

fn default_frame_rate() -> f32 {
    DEFAULT_FRAME_RATE
}

impl RetargetTrack {
    /// Empty track over the bones of `rig`
    pub fn new(rig: &TargetRig, frame_rate: f32) -> Self {
        Self {
            frame_rate,
            bones: rig.bones().iter().map(|b| b.name.clone()).collect(),
            frames: Vec::new(),
        }
    }

    /// Append the pose as the next frame
    pub fn push_pose(&mut self, pose: &TargetPose) {
        let mut rotations = pose.local_rotations().to_vec();
        rotations.resize(self.bones.len(), Quat::IDENTITY);
        self.frames.push(rotations);
    }

    pub fn bones(&self) -> &[String] {
        &self.bones
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time of the last frame in seconds
    pub fn duration(&self) -> f32 {
        if self.frames.len() < 2 || self.frame_rate <= 0.0 {
            return 0.0;
        }
        (self.frames.len() - 1) as f32 / self.frame_rate
    }

    pub fn frame(&self, index: usize) -> Option<&[Quat]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    pub fn rotation(&self, frame: usize, bone: &str) -> Option<Quat> {
        let bone = self.bones.iter().position(|b| b == bone)?;
        self.frames.get(frame)?.get(bone).copied()
    }

    /// Rotations at `time` seconds, slerping between neighbouring frames.
    ///
    /// Times outside the track clamp to the first or last frame; an empty
    /// track samples as the rest pose.
    pub fn sample(&self, time: f32) -> Vec<Quat> {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return vec![Quat::IDENTITY; self.bones.len()];
        };

        let position = (time * self.frame_rate).max(0.0);
        if !position.is_finite() || position >= (self.frames.len() - 1) as f32 {
            return if position.is_nan() { first.clone() } else { last.clone() };
        }

        let prev = position.floor() as usize;
        let t = position - prev as f32;
        if t <= 0.0 {
            return self.frames[prev].clone();
        }
        self.frames[prev]
            .iter()
            .zip(&self.frames[prev + 1])
            .map(|(a, b)| a.slerp(*b, t))
            .collect()
    }

    pub fn to_json(&self) -> RetargetTrackJson {
        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(frame, rotations)| TrackFrameJson {
                frame,
                rotations: self
                    .bones
                    .iter()
                    .cloned()
                    .zip(rotations.iter().map(|q| EulerAngles::from_quat(*q)))
                    .collect(),
            })
            .collect();

        RetargetTrackJson {
            version: default_version(),
            frame_rate: self.frame_rate,
            bones: self.bones.clone(),
            frames,
        }
    }

    /// Convert to JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_json())
    }

    /// Parse from JSON string. Bones absent from a frame are at rest.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let track_json: RetargetTrackJson = serde_json::from_str(json)?;

        let mut frames = track_json.frames;
        frames.sort_by_key(|f| f.frame);
        let frames: Vec<Vec<Quat>> = frames
            .iter()
            .map(|f| {
                track_json
                    .bones
                    .iter()
                    .map(|name| {
                        f.rotations
                            .get(name)
                            .map(EulerAngles::to_quat)
                            .unwrap_or(Quat::IDENTITY)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            frame_rate: track_json.frame_rate,
            bones: track_json.bones,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::same_rotation;
    use crate::target::TargetBone;

    fn rig() -> TargetRig {
        TargetRig::new(vec![
            TargetBone::new("hip", None),
            TargetBone::new("head", Some("hip")),
        ])
        .unwrap()
    }

    fn two_frame_track() -> RetargetTrack {
        let rig = rig();
        let mut track = RetargetTrack::new(&rig, 10.0);
        track.push_pose(&TargetPose::rest(&rig));
        track.push_pose(&TargetPose::rest(&rig).with_rotation(1, Quat::from_rotation_y(1.0)));
        track
    }

    #[test]
    fn test_rotation_lookup() {
        let track = two_frame_track();

        assert_eq!(track.len(), 2);
        assert_eq!(track.duration(), 0.1);
        assert_eq!(track.rotation(1, "head"), Some(Quat::from_rotation_y(1.0)));
        assert_eq!(track.rotation(1, "hip"), Some(Quat::IDENTITY));
        assert_eq!(track.rotation(2, "head"), None);
        assert_eq!(track.rotation(0, "tail"), None);
    }

    #[test]
    fn test_sample_interpolates_and_clamps() {
        let track = two_frame_track();

        let mid = track.sample(0.05);
        assert!(same_rotation(mid[1], Quat::from_rotation_y(0.5), 1e-5));

        assert_eq!(track.sample(-1.0), track.frame(0).unwrap());
        assert_eq!(track.sample(5.0), track.frame(1).unwrap());
    }

    #[test]
    fn test_empty_track_samples_rest() {
        let track = RetargetTrack::new(&rig(), DEFAULT_FRAME_RATE);
        assert!(track.is_empty());
        assert_eq!(track.sample(0.3), vec![Quat::IDENTITY; 2]);
        assert_eq!(track.duration(), 0.0);
    }

    #[test]
    fn test_json_uses_degrees() {
        let track = two_frame_track();
        let json = track.to_json();

        assert_eq!(json.frames.len(), 2);
        let head = json.frames[1].rotations["head"];
        assert!((head.y - 1f32.to_degrees()).abs() < 1e-3);
        assert!(head.x.abs() < 1e-3);

        let parsed = RetargetTrack::from_json(&track.to_json_string().unwrap()).unwrap();
        assert_eq!(parsed.bones(), track.bones());
        assert!(same_rotation(
            parsed.rotation(1, "head").unwrap(),
            Quat::from_rotation_y(1.0),
            1e-5
        ));
    }

    #[test]
    fn test_from_json_fills_missing_bones() {
        let json = r#"{
            "bones": ["hip", "head"],
            "frames": [{ "frame": 0, "rotations": { "head": { "x": 90 } } }]
        }"#;

        let track = RetargetTrack::from_json(json).unwrap();
        assert_eq!(track.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(track.rotation(0, "hip"), Some(Quat::IDENTITY));
        assert!(same_rotation(
            track.rotation(0, "head").unwrap(),
            Quat::from_rotation_x(90f32.to_radians()),
            1e-5
        ));
    }
}
