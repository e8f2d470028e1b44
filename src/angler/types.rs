//! Angler skill and per-location catch statistics.

use crate::core::constants::{ENGINEER_STARTING_SKILL, MAX_SKILL, SCIENTIST_STARTING_SKILL};
use crate::fishing::Fish;
use crate::save::lenient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Character role, used once to seed a new profile's skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnglerRole {
    Pilot,
    Engineer,
    Scientist,
    Tourist,
}

impl AnglerRole {
    pub fn starting_skill(&self) -> f64 {
        match self {
            AnglerRole::Engineer => ENGINEER_STARTING_SKILL,
            AnglerRole::Scientist => SCIENTIST_STARTING_SKILL,
            AnglerRole::Pilot | AnglerRole::Tourist => 0.0,
        }
    }
}

/// Catches at one location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationStats {
    #[serde(default, deserialize_with = "lenient")]
    pub caught_count: u32,
    /// Heaviest fish caught here, in kg.
    #[serde(default, deserialize_with = "lenient")]
    pub record_weight: f64,
}

/// A character's fishing skill and records.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` so older saves
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnglerProfile {
    /// 0 to 100. Never decreases.
    #[serde(default, deserialize_with = "lenient")]
    pub skill: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub stats_by_location: HashMap<String, LocationStats>,
}

impl AnglerProfile {
    pub fn new(role: AnglerRole) -> Self {
        Self {
            skill: role.starting_skill(),
            stats_by_location: HashMap::new(),
        }
    }

    /// Records a catch. Returns true if the fish set a new record for the location.
    pub fn record_catch(&mut self, location: &str, fish: &Fish) -> bool {
        let stats = self
            .stats_by_location
            .entry(location.to_string())
            .or_default();
        stats.caught_count = stats.caught_count.saturating_add(1);
        let new_record = fish.weight > stats.record_weight;
        stats.record_weight = stats.record_weight.max(fish.weight);
        new_record
    }

    /// Raises skill by `amount`, capped at 100. Returns the skill actually gained.
    pub fn increase_skill(&mut self, amount: f64) -> f64 {
        let before = self.skill;
        if amount > 0.0 && amount.is_finite() {
            self.skill = (self.skill + amount).min(MAX_SKILL);
        }
        self.skill - before
    }

    /// `1 + skill / 100`: 1.0 for a novice, 2.0 at max skill.
    pub fn skill_factor(&self) -> f64 {
        1.0 + self.skill.clamp(0.0, MAX_SKILL) / MAX_SKILL
    }

    pub fn biggest_fish(&self, location: &str) -> f64 {
        self.stats_by_location
            .get(location)
            .map_or(0.0, |s| s.record_weight)
    }

    pub fn fish_count(&self, location: &str) -> u32 {
        self.stats_by_location
            .get(location)
            .map_or(0, |s| s.caught_count)
    }

    pub fn total_caught(&self) -> u32 {
        self.stats_by_location
            .values()
            .fold(0u32, |acc, s| acc.saturating_add(s.caught_count))
    }

    /// Repairs values a corrupt save could carry. Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if !self.skill.is_finite() {
            self.skill = 0.0;
            changed = true;
        } else if !(0.0..=MAX_SKILL).contains(&self.skill) {
            self.skill = self.skill.clamp(0.0, MAX_SKILL);
            changed = true;
        }
        for stats in self.stats_by_location.values_mut() {
            if !stats.record_weight.is_finite() || stats.record_weight < 0.0 {
                stats.record_weight = 0.0;
                changed = true;
            }
        }
        changed
    }
}
