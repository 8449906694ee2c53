pub mod contribution;
pub mod engine;
pub mod track;

pub use engine::*;
pub use track::*;
