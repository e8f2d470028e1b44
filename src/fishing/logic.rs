//! Fish movement: a bounded random walk along the fish window.
//!
//! Each heading picks a random target in [0, 1] and a speed, then swims at
//! that constant speed until it should have arrived (or `max_change_time`
//! passes, whichever is first). Heavier fish at harder locations swim faster.

use super::types::Fish;
use crate::core::constants::FISH_MIN_SPEED_SCALE;
use crate::core::tuning::FishingTuning;
use rand::Rng;

/// Advances the fish by one fixed tick ending at simulation time `now`.
pub fn tick_fish(fish: &mut Fish, now: f64, tuning: &FishingTuning, rng: &mut impl Rng) {
    if now >= fish.next_change_at {
        pick_new_heading(fish, now, tuning, rng);
    } else {
        fish.position = (fish.position + fish.velocity * tuning.tick_seconds).clamp(0.0, 1.0);
    }
}

fn pick_new_heading(fish: &mut Fish, now: f64, tuning: &FishingTuning, rng: &mut impl Rng) {
    let target: f64 = rng.gen();
    let base_speed =
        tuning.fish_min_speed + rng.gen::<f64>() * (tuning.fish_max_speed - tuning.fish_min_speed);
    let speed = base_speed * speed_scale(fish.effective_difficulty());

    let offset = target - fish.position;
    fish.velocity = if offset > 0.0 {
        speed
    } else if offset < 0.0 {
        -speed
    } else {
        0.0
    };
    fish.next_change_at = now + time_to_target(offset, fish.velocity, tuning.fish_max_change_time);
}

/// `log2(effective difficulty) + 1`, floored so easy fish still move forward.
pub fn speed_scale(effective_difficulty: f64) -> f64 {
    if effective_difficulty <= 0.0 || effective_difficulty.is_nan() {
        return FISH_MIN_SPEED_SCALE;
    }
    let scale = effective_difficulty.log2() + 1.0;
    if scale.is_finite() {
        scale.max(FISH_MIN_SPEED_SCALE)
    } else {
        FISH_MIN_SPEED_SCALE
    }
}

/// Seconds until the fish reaches `offset` at `velocity`, capped at `max_time`.
///
/// Zero, non-finite or wrong-signed velocities fall back to `max_time`, so the
/// result is always finite and non-negative.
pub fn time_to_target(offset: f64, velocity: f64, max_time: f64) -> f64 {
    if velocity == 0.0 || !velocity.is_finite() {
        return max_time;
    }
    let time = offset / velocity;
    if time.is_finite() && time >= 0.0 {
        time.min(max_time)
    } else {
        max_time
    }
}
