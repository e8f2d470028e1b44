//! Save record and disk persistence.

pub mod persistence;
pub mod types;

pub use persistence::*;
pub use types::*;
