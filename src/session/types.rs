//! Fishing session data structures.
//!
//! One session covers a character standing at one location, from the first
//! cast until the player walks away. The state machine runs
//! Idle -> Casting -> Reeling -> Hooked -> Caught -> Idle, with Inactive
//! reachable from anywhere.

use crate::angler::AnglerRole;
use crate::core::tuning::{FishingTuning, TuningError};
use crate::environment::{LocationContext, LocationError};
use crate::fishing::Fish;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a session cannot start.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("invalid fishing tuning: {0}")]
    Tuning(#[from] TuningError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the player to cast.
    Idle,
    /// Bob in flight. Ends on its own after the cast time.
    Casting,
    /// Bob in the water, player reeling it back in.
    Reeling,
    /// Fighting a fish.
    Hooked,
    /// Showing off the catch until the presentation layer is done.
    Caught,
    /// Session over. Nothing ticks any more.
    Inactive,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Casting => "Casting",
            SessionState::Reeling => "Reeling",
            SessionState::Hooked => "Hooked",
            SessionState::Caught => "Caught",
            SessionState::Inactive => "Inactive",
        }
    }
}

/// Discrete player input, sampled at the host's frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishingInput {
    CastLine,
    ReelDown,
    ReelUp,
    RodLeft,
    RodRight,
    Cancel,
}

/// Host state read once per fixed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSignals {
    /// True while the catch animation is still playing. Holds the Caught state.
    pub presentation_busy: bool,
}

/// What a successful catch earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchReward {
    pub skill_gained: f64,
    pub new_record: bool,
    /// Catches at this location including this one.
    pub caught_count: u32,
}

/// Events for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(SessionState),
    /// The bob came back in, with or without a bite.
    CastResolved { hooked: bool },
    FishHooked(Fish),
    FishEscaped,
    FishCaught { fish: Fish, reward: CatchReward },
    AttemptAbandoned,
}

/// A running fishing session.
#[derive(Debug, Clone)]
pub struct FishingSession {
    pub angler: String,
    pub role: AnglerRole,
    pub location: LocationContext,
    pub tuning: FishingTuning,
    pub state: SessionState,

    // Clocks
    /// Fixed ticks since the session started.
    pub tick_count: u64,
    /// Fixed ticks since the last state change.
    pub state_ticks: u64,

    // Attempt state
    /// 0 = at the rod tip, 1 = fully cast. Above 1 the fish escapes, below 0 it is landed.
    pub bob_distance: f64,
    /// A bite happens once the bob is reeled below this. Negative means no bite this cast.
    pub hook_threshold: f64,
    /// Rod position along the fish window, 0.0 to 1.0.
    pub rod_position: f64,
    /// Slack built up by keeping the rod on the fish, 0 to `max_rod_leeway`.
    pub leeway: f64,
    pub reel_held: bool,
    pub fish: Option<Fish>,

    // Fight parameters fixed when the fish bites
    pub rod_window: f64,
    pub catch_speed: f64,
    pub escape_speed: f64,
    pub hooked_reeling_speed: f64,
}

impl FishingSession {
    /// Simulation time in seconds.
    pub fn now(&self) -> f64 {
        self.tick_count as f64 * self.tuning.tick_seconds
    }

    /// Seconds spent in the current state.
    pub fn state_elapsed(&self) -> f64 {
        self.state_ticks as f64 * self.tuning.tick_seconds
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Inactive
    }

    /// Leeway as a fraction of its cap, for driving the rod-bend animation.
    pub fn leeway_fraction(&self) -> f64 {
        if self.tuning.max_rod_leeway > 0.0 {
            (self.leeway / self.tuning.max_rod_leeway).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// True while the rod window covers the fish.
    pub fn rod_on_fish(&self) -> bool {
        self.fish
            .as_ref()
            .is_some_and(|fish| (fish.position - self.rod_position).abs() < self.rod_window)
    }
}
