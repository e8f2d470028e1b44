//! Tier classification and fish generation.

use super::logic::tick_fish;
use super::types::{Fish, SpeciesTier};
use crate::core::constants::{
    COASTAL_MIN_HEIGHT, DEEP_OCEAN_MIN_HEIGHT, FISH_START_POSITION, MIN_FISH_DIFFICULTY,
    OCEAN_MIN_HEIGHT,
};
use crate::core::tuning::FishingTuning;
use crate::environment::{BiomeClass, LocationContext};
use rand::Rng;
use rand_distr::StandardNormal;

/// Classifies a location into a species tier.
///
/// Order matters: the home pond wins over everything, then any non-water biome
/// is freshwater, then open water is split by depth.
pub fn classify_tier(special_zone: bool, biome: BiomeClass, terrain_height: f64) -> SpeciesTier {
    if special_zone {
        return SpeciesTier::Pond;
    }
    if !biome.is_water() {
        return SpeciesTier::Freshwater;
    }

    if terrain_height > COASTAL_MIN_HEIGHT {
        SpeciesTier::Coastal
    } else if terrain_height > OCEAN_MIN_HEIGHT {
        SpeciesTier::Ocean
    } else if terrain_height > DEEP_OCEAN_MIN_HEIGHT {
        SpeciesTier::DeepOcean
    } else {
        SpeciesTier::Kraken
    }
}

pub fn classify(context: &LocationContext) -> SpeciesTier {
    classify_tier(context.special_zone, context.biome, context.terrain_height)
}

/// Draws a fish weight for the tier.
///
/// Normal sample with the tier's mean and deviation, scaled by local gravity
/// and clamped to the tier minimum.
pub fn generate_weight(tier: SpeciesTier, gravity_ratio: f64, rng: &mut impl Rng) -> f64 {
    let (mean, std_dev) = tier.weight_distribution();
    let z: f64 = rng.sample(StandardNormal);
    weight_from_sample(tier, mean + std_dev * z, gravity_ratio)
}

/// Scales an unclamped weight sample by gravity and applies the tier minimum.
pub fn weight_from_sample(tier: SpeciesTier, sample: f64, gravity_ratio: f64) -> f64 {
    let gravity = if gravity_ratio.is_finite() {
        gravity_ratio.max(0.0)
    } else {
        0.0
    };
    let weight = sample * gravity;
    if weight.is_finite() {
        weight.max(tier.min_weight())
    } else {
        tier.min_weight()
    }
}

/// `max(0.5, log16(weight) + 0.5)`
pub fn generate_difficulty(weight: f64) -> f64 {
    if weight <= 0.0 || weight.is_nan() {
        return MIN_FISH_DIFFICULTY;
    }
    (weight.log(16.0) + 0.5).max(MIN_FISH_DIFFICULTY)
}

/// Creates the fish that just bit at `context`.
///
/// The fish starts centred and immediately picks its first heading.
pub fn generate_fish(
    context: &LocationContext,
    now: f64,
    tuning: &FishingTuning,
    rng: &mut impl Rng,
) -> Fish {
    let tier = classify(context);
    let weight = generate_weight(tier, context.gravity_ratio, rng);

    let mut fish = Fish {
        tier,
        weight,
        difficulty: generate_difficulty(weight),
        location_difficulty: context.difficulty,
        position: FISH_START_POSITION,
        velocity: 0.0,
        next_change_at: now,
    };
    tick_fish(&mut fish, now, tuning, rng);
    fish
}
