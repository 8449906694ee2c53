pub mod defaults;
pub mod rule;
pub mod table;

pub use rule::*;
pub use table::*;
