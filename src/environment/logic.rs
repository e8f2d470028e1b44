//! Resolving and caching per-location context.

use super::types::{BiomeClass, EnvironmentContext};
use crate::core::constants::{MIN_LOCATION_DIFFICULTY, RICHNESS_DIVISOR};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A location the core cannot fish at.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("no terrain height available for {0}")]
    MissingTerrain(String),
    #[error("no biome data available for {0}")]
    MissingBiome(String),
}

/// Snapshot of everything the environment says about one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContext {
    pub location: String,
    pub gravity_ratio: f64,
    pub terrain_height: f64,
    pub biome: BiomeClass,
    pub special_zone: bool,
    pub richness: f64,
    /// Scales fish speed and the hooked fight. Never below `MIN_LOCATION_DIFFICULTY`.
    pub difficulty: f64,
}

impl LocationContext {
    pub fn resolve(env: &impl EnvironmentContext, location: &str) -> Result<Self, LocationError> {
        let terrain_height = env
            .terrain_height(location)
            .filter(|h| h.is_finite())
            .ok_or_else(|| LocationError::MissingTerrain(location.to_string()))?;
        let biome = env
            .biome_class(location)
            .ok_or_else(|| LocationError::MissingBiome(location.to_string()))?;

        let gravity_ratio = env.gravity_ratio(location);
        let richness = env.local_richness(location);

        Ok(Self {
            location: location.to_string(),
            gravity_ratio,
            terrain_height,
            biome,
            special_zone: env.is_special_zone(location),
            richness,
            difficulty: location_difficulty(gravity_ratio, richness),
        })
    }
}

/// Gravity plus a tenth of the local richness, floored so it can divide safely.
pub fn location_difficulty(gravity_ratio: f64, richness: f64) -> f64 {
    let raw = gravity_ratio + richness / RICHNESS_DIVISOR;
    if raw.is_finite() {
        raw.max(MIN_LOCATION_DIFFICULTY)
    } else {
        MIN_LOCATION_DIFFICULTY
    }
}

/// Memoises resolved contexts so repeated attempts at one spot skip the host lookups.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCache {
    entries: HashMap<String, LocationContext>,
}

impl EnvironmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached context, resolving and storing it on first use.
    /// Failed resolutions are not cached.
    pub fn resolve(
        &mut self,
        env: &impl EnvironmentContext,
        location: &str,
    ) -> Result<&LocationContext, LocationError> {
        if !self.entries.contains_key(location) {
            let context = LocationContext::resolve(env, location)?;
            self.entries.insert(location.to_string(), context);
        }
        self.entries
            .get(location)
            .ok_or_else(|| LocationError::MissingTerrain(location.to_string()))
    }

    pub fn invalidate(&mut self, location: &str) {
        self.entries.remove(location);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
