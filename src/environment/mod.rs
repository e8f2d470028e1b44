//! World lookups the fishing core needs from the host game.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
