use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A bone of the avatar rig. Owned by the host; only its rotation is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetBone {
    pub name: String,
    /// Parent bone (None for root)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl TargetBone {
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }
}

/// Genesis 8 avatar hierarchy, (bone, parent).
/// Ordered for topological traversal (parents before children).
pub const GENESIS8_HIERARCHY: &[(&str, Option<&str>)] = &[
    ("hip", None),
    ("pelvis", Some("hip")),
    // Spine chain
    ("abdomenLower", Some("hip")),
    ("abdomenUpper", Some("abdomenLower")),
    ("chestLower", Some("abdomenUpper")),
    ("chestUpper", Some("chestLower")),
    ("neckLower", Some("chestUpper")),
    ("neckUpper", Some("neckLower")),
    ("head", Some("neckUpper")),
    // Left arm chain
    ("lCollar", Some("chestUpper")),
    ("lShldrBend", Some("lCollar")),
    ("lShldrTwist", Some("lShldrBend")),
    ("lForearmBend", Some("lShldrTwist")),
    ("lForearmTwist", Some("lForearmBend")),
    ("lHand", Some("lForearmTwist")),
    ("lThumb1", Some("lHand")),
    ("lThumb2", Some("lThumb1")),
    ("lThumb3", Some("lThumb2")),
    ("lCarpal1", Some("lHand")),
    ("lIndex1", Some("lCarpal1")),
    ("lIndex2", Some("lIndex1")),
    ("lIndex3", Some("lIndex2")),
    ("lCarpal2", Some("lHand")),
    ("lMid1", Some("lCarpal2")),
    ("lMid2", Some("lMid1")),
    ("lMid3", Some("lMid2")),
    ("lCarpal3", Some("lHand")),
    ("lRing1", Some("lCarpal3")),
    ("lRing2", Some("lRing1")),
    ("lRing3", Some("lRing2")),
    ("lCarpal4", Some("lHand")),
    ("lPinky1", Some("lCarpal4")),
    ("lPinky2", Some("lPinky1")),
    ("lPinky3", Some("lPinky2")),
    // Right arm chain
    ("rCollar", Some("chestUpper")),
    ("rShldrBend", Some("rCollar")),
    ("rShldrTwist", Some("rShldrBend")),
    ("rForearmBend", Some("rShldrTwist")),
    ("rForearmTwist", Some("rForearmBend")),
    ("rHand", Some("rForearmTwist")),
    ("rThumb1", Some("rHand")),
    ("rThumb2", Some("rThumb1")),
    ("rThumb3", Some("rThumb2")),
    ("rCarpal1", Some("rHand")),
    ("rIndex1", Some("rCarpal1")),
    ("rIndex2", Some("rIndex1")),
    ("rIndex3", Some("rIndex2")),
    ("rCarpal2", Some("rHand")),
    ("rMid1", Some("rCarpal2")),
    ("rMid2", Some("rMid1")),
    ("rMid3", Some("rMid2")),
    ("rCarpal3", Some("rHand")),
    ("rRing1", Some("rCarpal3")),
    ("rRing2", Some("rRing1")),
    ("rRing3", Some("rRing2")),
    ("rCarpal4", Some("rHand")),
    ("rPinky1", Some("rCarpal4")),
    ("rPinky2", Some("rPinky1")),
    ("rPinky3", Some("rPinky2")),
    // Legs
    ("lThighBend", Some("pelvis")),
    ("lThighTwist", Some("lThighBend")),
    ("lShin", Some("lThighTwist")),
    ("lFoot", Some("lShin")),
    ("rThighBend", Some("pelvis")),
    ("rThighTwist", Some("rThighBend")),
    ("rShin", Some("rThighTwist")),
    ("rFoot", Some("rShin")),
];

pub fn genesis8_bones() -> Vec<TargetBone> {
    GENESIS8_HIERARCHY
        .iter()
        .map(|(name, parent)| TargetBone::new(*name, *parent))
        .collect()
}

/// Validated target hierarchy with name lookup
#[derive(Debug, Clone)]
pub struct TargetRig {
    bones: Vec<TargetBone>,
    parents: Vec<Option<usize>>,
    index: HashMap<String, usize>,
}

impl TargetRig {
    /// Bones must be listed parents first
    pub fn new(bones: Vec<TargetBone>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(bones.len());
        let mut parents = Vec::with_capacity(bones.len());

        for (i, bone) in bones.iter().enumerate() {
            let parent = match &bone.parent {
                Some(parent) => Some(index.get(parent).copied().ok_or_else(|| {
                    ConfigError::UnknownParent {
                        bone: bone.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            if index.insert(bone.name.clone(), i).is_some() {
                return Err(ConfigError::DuplicateTargetBone(bone.name.clone()));
            }
            parents.push(parent);
        }

        Ok(Self {
            bones,
            parents,
            index,
        })
    }

    /// Rig built from [`GENESIS8_HIERARCHY`]
    pub fn genesis8() -> Result<Self, ConfigError> {
        Self::new(genesis8_bones())
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn bone(&self, index: usize) -> Option<&TargetBone> {
        self.bones.get(index)
    }

    pub fn name(&self, index: usize) -> &str {
        &self.bones[index].name
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    pub fn bones(&self) -> &[TargetBone] {
        &self.bones
    }
}
