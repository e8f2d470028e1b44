//! Fish data structures.

use crate::core::constants::{DEFAULT_MIN_WEIGHT, POND_MIN_WEIGHT};
use serde::{Deserialize, Serialize};

/// Size class of the fish found at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesTier {
    Pond,
    Freshwater,
    Coastal,
    Ocean,
    DeepOcean,
    Kraken,
}

impl SpeciesTier {
    pub const ALL: [SpeciesTier; 6] = [
        SpeciesTier::Pond,
        SpeciesTier::Freshwater,
        SpeciesTier::Coastal,
        SpeciesTier::Ocean,
        SpeciesTier::DeepOcean,
        SpeciesTier::Kraken,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpeciesTier::Pond => "Pond",
            SpeciesTier::Freshwater => "Freshwater",
            SpeciesTier::Coastal => "Coastal",
            SpeciesTier::Ocean => "Ocean",
            SpeciesTier::DeepOcean => "Deep Ocean",
            SpeciesTier::Kraken => "Kraken",
        }
    }

    /// Mean and standard deviation of the weight distribution, in kg at reference gravity.
    pub fn weight_distribution(&self) -> (f64, f64) {
        match self {
            SpeciesTier::Pond => (2.0, 0.5),
            SpeciesTier::Freshwater => (8.0, 2.0),
            SpeciesTier::Coastal => (15.0, 3.0),
            SpeciesTier::Ocean => (50.0, 13.0),
            SpeciesTier::DeepOcean => (100.0, 20.0),
            SpeciesTier::Kraken => (500.0, 100.0),
        }
    }

    /// Lower clamp for generated weights. There is no upper clamp.
    pub fn min_weight(&self) -> f64 {
        match self {
            SpeciesTier::Pond => POND_MIN_WEIGHT,
            _ => DEFAULT_MIN_WEIGHT,
        }
    }
}

/// A hooked fish.
///
/// `weight` and `difficulty` are fixed at creation. Position, velocity and the
/// next direction change are advanced by the motion model every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub tier: SpeciesTier,
    /// Weight in kg.
    pub weight: f64,
    /// Derived from weight, never below 0.5.
    pub difficulty: f64,
    /// Difficulty of the location the fish was hooked at.
    pub location_difficulty: f64,
    /// Position along the fish window, 0.0 = left edge, 1.0 = right edge.
    pub position: f64,
    /// Signed speed in window widths per second.
    pub velocity: f64,
    /// Simulation time at which the random walk picks a new target.
    pub next_change_at: f64,
}

impl Fish {
    /// Fish difficulty combined with location difficulty.
    pub fn effective_difficulty(&self) -> f64 {
        self.difficulty * self.location_difficulty
    }

    /// True while the fish swims toward the right edge.
    pub fn facing_right(&self) -> bool {
        self.velocity > 0.0
    }
}
