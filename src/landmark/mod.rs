pub mod json;
pub mod names;
pub mod store;

pub use json::*;
pub use names::*;
pub use store::*;
