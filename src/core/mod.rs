//! Tuning constants and the runtime-loadable tuning record.

pub mod constants;
pub mod tuning;

pub use constants::*;
pub use tuning::{FishingTuning, TuningError};
