pub mod pose;
pub mod rig;

pub use pose::*;
pub use rig::*;
