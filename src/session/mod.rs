//! The fishing state machine driven by the host's fixed tick.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
