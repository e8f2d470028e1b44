//! The persisted fishing record: save-wide counters plus every angler profile.

use crate::angler::{AnglerProfile, AnglerRole};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Everything fishing persists, keyed by character name.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` so older saves
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FishingSave {
    /// Casts in a row that ended without a bite. Shared by every angler in the save.
    #[serde(default, deserialize_with = "lenient")]
    pub failed_attempts: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub tutorial_shown: bool,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub profiles: HashMap<String, AnglerProfile>,
    /// Unix seconds of the last write to disk.
    #[serde(default, deserialize_with = "lenient")]
    pub last_save_time: i64,
}

impl FishingSave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self, name: &str) -> Option<&AnglerProfile> {
        self.profiles.get(name)
    }

    /// Returns the angler's profile, creating it from `role` on first reference.
    pub fn profile_mut(&mut self, name: &str, role: AnglerRole) -> &mut AnglerProfile {
        self.profiles
            .entry(name.to_string())
            .or_insert_with(|| AnglerProfile::new(role))
    }

    /// True the first time it is called for this save.
    pub fn take_tutorial_prompt(&mut self) -> bool {
        let show = !self.tutorial_shown;
        self.tutorial_shown = true;
        show
    }

    pub fn record_failed_attempt(&mut self) {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
    }

    pub fn reset_failed_attempts(&mut self) {
        self.failed_attempts = 0;
    }

    /// Repairs out-of-range values in every profile.
    pub fn sanitize(&mut self) {
        for (name, profile) in self.profiles.iter_mut() {
            if profile.sanitize() {
                warn!("repaired corrupt fishing profile for {}", name);
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a save record. Missing or malformed fields default; only text
    /// that is not a JSON object at all is an error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut save: FishingSave = serde_json::from_str(json)?;
        save.sanitize();
        Ok(save)
    }
}

/// Deserializes a field, falling back to its default when the stored value
/// has the wrong shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match T::deserialize(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("ignoring unreadable save field: {}", e);
            Ok(T::default())
        }
    }
}

/// Deserializes a map, dropping entries whose values cannot be read.
pub fn lenient_entries<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: HashMap<String, serde_json::Value> = lenient(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match T::deserialize(value) {
            Ok(parsed) => Some((key, parsed)),
            Err(e) => {
                warn!("dropping unreadable save entry {}: {}", key, e);
                None
            }
        })
        .collect())
}
