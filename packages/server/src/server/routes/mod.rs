// HTTP routes
pub mod health;
pub mod mind_map;

pub use health::*;
pub use mind_map::*;
