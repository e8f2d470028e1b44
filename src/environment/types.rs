//! Environment contract and an in-memory implementation of it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse biome classification of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeClass {
    Water,
    Shore,
    Other,
}

impl BiomeClass {
    pub fn is_water(&self) -> bool {
        matches!(self, BiomeClass::Water)
    }
}

/// Values the fishing core reads from the surrounding world.
///
/// `terrain_height` and `biome_class` return `None` when the host has no data
/// for the location. A location without them cannot be fished.
pub trait EnvironmentContext {
    /// Local surface gravity divided by the reference gravity.
    fn gravity_ratio(&self, location: &str) -> f64;
    fn terrain_height(&self, location: &str) -> Option<f64>;
    fn biome_class(&self, location: &str) -> Option<BiomeClass>;
    /// True inside the small pond zone near the home base.
    fn is_special_zone(&self, location: &str) -> bool;
    fn local_richness(&self, location: &str) -> f64;
}

/// Everything known about one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub gravity_ratio: f64,
    pub terrain_height: Option<f64>,
    pub biome: Option<BiomeClass>,
    #[serde(default)]
    pub special_zone: bool,
    #[serde(default)]
    pub richness: f64,
}

impl LocationData {
    /// Open water at reference gravity.
    pub fn water(terrain_height: f64) -> Self {
        Self {
            gravity_ratio: 1.0,
            terrain_height: Some(terrain_height),
            biome: Some(BiomeClass::Water),
            special_zone: false,
            richness: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity_ratio: f64) -> Self {
        self.gravity_ratio = gravity_ratio;
        self
    }

    pub fn with_richness(mut self, richness: f64) -> Self {
        self.richness = richness;
        self
    }

    pub fn with_biome(mut self, biome: BiomeClass) -> Self {
        self.biome = Some(biome);
        self
    }

    pub fn special_zone(mut self) -> Self {
        self.special_zone = true;
        self
    }
}

/// Environment backed by a precomputed table of locations.
///
/// Unknown locations report reference gravity, zero richness and no terrain
/// or biome data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticEnvironment {
    locations: HashMap<String, LocationData>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, data: LocationData) {
        self.locations.insert(location.into(), data);
    }

    pub fn with_location(mut self, location: impl Into<String>, data: LocationData) -> Self {
        self.insert(location, data);
        self
    }

    pub fn remove(&mut self, location: &str) -> Option<LocationData> {
        self.locations.remove(location)
    }

    pub fn get(&self, location: &str) -> Option<&LocationData> {
        self.locations.get(location)
    }
}

impl EnvironmentContext for StaticEnvironment {
    fn gravity_ratio(&self, location: &str) -> f64 {
        self.get(location).map_or(1.0, |d| d.gravity_ratio)
    }

    fn terrain_height(&self, location: &str) -> Option<f64> {
        self.get(location).and_then(|d| d.terrain_height)
    }

    fn biome_class(&self, location: &str) -> Option<BiomeClass> {
        self.get(location).and_then(|d| d.biome)
    }

    fn is_special_zone(&self, location: &str) -> bool {
        self.get(location).is_some_and(|d| d.special_zone)
    }

    fn local_richness(&self, location: &str) -> f64 {
        self.get(location).map_or(0.0, |d| d.richness)
    }
}
