//! Balance values for the fishing minigame.
//!
//! All values default to the reference tuning in `constants`. A host can ship
//! a partial JSON object and only override what it needs.

use super::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a tuning record violates its invariants.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value:.3})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.3})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{min_field} ({min:.3}) exceeds {max_field} ({max:.3})")]
    MinExceedsMax {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("catch chance divisor must be at least 1")]
    ZeroCatchDivisor,
    #[error("tuning json invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Every balance value the session, fish and profile logic read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingTuning {
    /// Simulated seconds per fixed tick.
    pub tick_seconds: f64,
    /// Dead time at the start of a cast before the bob flies out.
    pub cast_delay: f64,
    /// Length of the bob's flight from 0 to 1.
    pub cast_duration: f64,
    /// Total time spent in Casting before Reeling begins.
    pub cast_time: f64,
    pub reeling_speed: f64,
    pub hooked_reeling_speed: f64,
    pub hook_threshold_min: f64,
    pub hook_threshold_max: f64,
    pub catch_chance_divisor: u32,
    pub fish_catch_speed: f64,
    pub fish_escape_speed: f64,
    pub max_rod_leeway: f64,
    /// Half-width of the rod window at zero skill, as a fraction of the fish window.
    pub rod_window_ratio: f64,
    pub rod_delta: f64,
    pub fish_min_speed: f64,
    pub fish_max_speed: f64,
    pub fish_max_change_time: f64,
    pub skill_gain_empty_reel: f64,
    pub skill_gain_missed: f64,
    pub skill_gain_caught: f64,
}

impl Default for FishingTuning {
    fn default() -> Self {
        Self {
            tick_seconds: FIXED_TICK_SECONDS,
            cast_delay: CAST_DELAY_SECONDS,
            cast_duration: CAST_DURATION_SECONDS,
            cast_time: CAST_TIME_SECONDS,
            reeling_speed: REELING_SPEED,
            hooked_reeling_speed: HOOKED_REELING_SPEED,
            hook_threshold_min: HOOK_THRESHOLD_MIN,
            hook_threshold_max: HOOK_THRESHOLD_MAX,
            catch_chance_divisor: CATCH_CHANCE_DIVISOR,
            fish_catch_speed: FISH_CATCH_SPEED,
            fish_escape_speed: FISH_ESCAPE_SPEED,
            max_rod_leeway: MAX_ROD_LEEWAY,
            rod_window_ratio: ROD_WINDOW_RATIO,
            rod_delta: ROD_DELTA,
            fish_min_speed: FISH_MIN_SPEED,
            fish_max_speed: FISH_MAX_SPEED,
            fish_max_change_time: FISH_MAX_CHANGE_TIME,
            skill_gain_empty_reel: SKILL_GAIN_EMPTY_REEL,
            skill_gain_missed: SKILL_GAIN_MISSED,
            skill_gain_caught: SKILL_GAIN_CAUGHT,
        }
    }
}

impl FishingTuning {
    /// Parse a (possibly partial) JSON tuning object and validate it.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: FishingTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("tick_seconds", self.tick_seconds),
            ("cast_duration", self.cast_duration),
            ("cast_time", self.cast_time),
            ("reeling_speed", self.reeling_speed),
            ("hooked_reeling_speed", self.hooked_reeling_speed),
            ("fish_catch_speed", self.fish_catch_speed),
            ("fish_escape_speed", self.fish_escape_speed),
            ("max_rod_leeway", self.max_rod_leeway),
            ("rod_delta", self.rod_delta),
            ("fish_min_speed", self.fish_min_speed),
            ("fish_max_change_time", self.fish_max_change_time),
        ] {
            ensure_positive(field, value)?;
        }

        if self.cast_delay < 0.0 || self.cast_delay.is_nan() {
            return Err(TuningError::RangeViolation {
                field: "cast_delay",
                min: 0.0,
                max: self.cast_time,
                value: self.cast_delay,
            });
        }
        if self.cast_delay + self.cast_duration > self.cast_time {
            return Err(TuningError::MinExceedsMax {
                min_field: "cast_delay + cast_duration",
                max_field: "cast_time",
                min: self.cast_delay + self.cast_duration,
                max: self.cast_time,
            });
        }

        // Thresholds must sit strictly inside the bob's travel so a bite can actually happen.
        ensure_range("hook_threshold_min", self.hook_threshold_min, 0.0, 1.0)?;
        ensure_range("hook_threshold_max", self.hook_threshold_max, 0.0, 1.0)?;
        if self.hook_threshold_min > self.hook_threshold_max {
            return Err(TuningError::MinExceedsMax {
                min_field: "hook_threshold_min",
                max_field: "hook_threshold_max",
                min: self.hook_threshold_min,
                max: self.hook_threshold_max,
            });
        }

        if self.fish_min_speed > self.fish_max_speed {
            return Err(TuningError::MinExceedsMax {
                min_field: "fish_min_speed",
                max_field: "fish_max_speed",
                min: self.fish_min_speed,
                max: self.fish_max_speed,
            });
        }

        ensure_range("rod_window_ratio", self.rod_window_ratio, 0.0, 1.0)?;
        if self.rod_window_ratio == 0.0 {
            return Err(TuningError::NotPositive {
                field: "rod_window_ratio",
                value: self.rod_window_ratio,
            });
        }

        if self.catch_chance_divisor == 0 {
            return Err(TuningError::ZeroCatchDivisor);
        }

        for (field, value) in [
            ("skill_gain_empty_reel", self.skill_gain_empty_reel),
            ("skill_gain_missed", self.skill_gain_missed),
            ("skill_gain_caught", self.skill_gain_caught),
        ] {
            ensure_range(field, value, 0.0, MAX_SKILL)?;
        }

        Ok(())
    }

    /// Chance that the next cast gets a bite, given the save-wide failure streak.
    pub fn catch_chance(&self, failed_attempts: u32) -> f64 {
        (failed_attempts as f64 + 1.0) / self.catch_chance_divisor.max(1) as f64
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), TuningError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}
