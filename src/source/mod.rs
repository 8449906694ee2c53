pub mod bone;
pub mod defaults;
pub mod topology;

pub use bone::*;
pub use topology::*;

use serde::{Deserialize, Serialize};

/// Which copy of the source skeleton a rule reads from.
///
/// Both copies hold the same bones; they differ only in the global
/// correction applied to their root (see [`crate::correction`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRig {
    /// Body and hands
    #[default]
    Body,
    /// Head and face
    Head,
}
