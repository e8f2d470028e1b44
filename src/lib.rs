//! Angling - Fishing Minigame Simulation Core
//!
//! Fish generation, the cast/reel/fight state machine and per-character
//! skill records. Rendering, audio and input devices belong to the host.

pub mod angler;
pub mod core;
pub mod environment;
pub mod fishing;
pub mod save;
pub mod session;

pub use angler::{AnglerProfile, AnglerRole};
pub use environment::{EnvironmentContext, LocationContext, LocationError, StaticEnvironment};
pub use save::{FishingSave, SaveManager};
pub use session::{
    FishingInput, FishingSession, SessionError, SessionEvent, SessionState, TickSignals,
};
