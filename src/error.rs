//! Error types for configuration loading and validation.
//!
//! Every variant is fatal and raised before the first frame is processed.
//! Per-frame problems are not errors; see [`crate::diagnostics`].

use thiserror::Error;

use crate::mapping::AxisMask;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two connections or anchors produce the same source bone.
    #[error("duplicate source bone name: {0}")]
    DuplicateBone(String),

    /// A connection or anchor refers to an empty landmark name.
    #[error("source bone {bone:?} references an empty landmark name")]
    EmptyLandmarkName { bone: String },

    #[error("mapping rule {index} references unknown target bone: {name}")]
    UnknownTargetBone { index: usize, name: String },

    #[error("mapping rule {index} references unknown source bone: {name}")]
    UnknownSourceBone { index: usize, name: String },

    /// Anchors carry a position only and cannot drive a rotation.
    #[error("mapping rule {index} uses anchor bone {name} as a rotation source")]
    AnchorAsRotationSource { index: usize, name: String },

    #[error("malformed axis mask: {0:?}")]
    MalformedAxisMask(String),

    #[error("mapping rule {index} inverts axes {invert} outside its copied axes {axes}")]
    InvertOutsideMask {
        index: usize,
        axes: AxisMask,
        invert: AxisMask,
    },

    #[error("mapping rule {index} has influence {influence}, expected a value in [0, 1]")]
    InvalidInfluence { index: usize, influence: f32 },

    #[error("duplicate target bone name: {0}")]
    DuplicateTargetBone(String),

    /// Parents must be declared before their children.
    #[error("target bone {bone} has unknown or later-declared parent {parent}")]
    UnknownParent { bone: String, parent: String },

    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(f32),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
