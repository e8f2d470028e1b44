//! Per-character fishing skill and catch records.

pub mod types;

pub use types::*;
