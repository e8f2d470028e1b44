//! Fishing session logic: input handling, the fixed-step tick and state
//! transitions.
//!
//! The session never looks anything up on its own. The save record, the
//! environment and the random source are passed in by whoever drives the
//! character's turn.

use super::types::*;
use crate::angler::AnglerRole;
use crate::core::constants::{NO_HOOK_SENTINEL, ROD_START_POSITION};
use crate::core::tuning::FishingTuning;
use crate::environment::{EnvironmentContext, LocationContext};
use crate::fishing::{generate_fish, tick_fish};
use crate::save::FishingSave;
use log::{debug, info, warn};
use rand::Rng;

/// Slack for comparing accumulated tick time against phase lengths.
const TIME_EPSILON: f64 = 1e-9;

impl FishingSession {
    /// Starts fishing with the reference tuning.
    pub fn start(
        env: &impl EnvironmentContext,
        location: &str,
        angler: &str,
        role: AnglerRole,
        save: &mut FishingSave,
    ) -> Result<Self, SessionError> {
        Self::start_with_tuning(env, location, angler, role, save, FishingTuning::default())
    }

    /// Starts fishing at `location`. Fails if the tuning is invalid or the
    /// environment has no terrain or biome data there. Creates the angler's
    /// profile on first use.
    pub fn start_with_tuning(
        env: &impl EnvironmentContext,
        location: &str,
        angler: &str,
        role: AnglerRole,
        save: &mut FishingSave,
        tuning: FishingTuning,
    ) -> Result<Self, SessionError> {
        tuning.validate()?;
        let context = LocationContext::resolve(env, location)?;
        debug!(
            "location difficulty for {} = {:.3}",
            context.location, context.difficulty
        );
        save.profile_mut(angler, role);
        let hooked_reeling_speed = tuning.hooked_reeling_speed / context.difficulty;

        Ok(Self {
            angler: angler.to_string(),
            role,
            location: context,
            tuning,
            state: SessionState::Idle,
            tick_count: 0,
            state_ticks: 0,
            bob_distance: 0.0,
            hook_threshold: NO_HOOK_SENTINEL,
            rod_position: ROD_START_POSITION,
            leeway: 0.0,
            reel_held: false,
            fish: None,
            rod_window: tuning.rod_window_ratio,
            catch_speed: 0.0,
            escape_speed: 0.0,
            hooked_reeling_speed,
        })
    }

    /// Applies one discrete input. Inputs that do not apply to the current
    /// state are ignored.
    pub fn handle_input(&mut self, input: FishingInput) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state == SessionState::Inactive {
            return events;
        }

        match input {
            FishingInput::CastLine => {
                if self.state == SessionState::Idle {
                    self.set_state(SessionState::Casting, &mut events);
                }
            }
            FishingInput::ReelDown => self.reel_held = true,
            FishingInput::ReelUp => self.reel_held = false,
            FishingInput::RodLeft => {
                if self.state == SessionState::Hooked {
                    self.rod_position = (self.rod_position - self.tuning.rod_delta).max(0.0);
                }
            }
            FishingInput::RodRight => {
                if self.state == SessionState::Hooked {
                    self.rod_position = (self.rod_position + self.tuning.rod_delta).min(1.0);
                }
            }
            FishingInput::Cancel => return self.cancel(),
        }

        events
    }

    /// Stops fishing immediately, discarding the attempt in progress.
    pub fn cancel(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state != SessionState::Inactive {
            self.set_state(SessionState::Inactive, &mut events);
            events.push(SessionEvent::AttemptAbandoned);
        }
        events
    }

    /// External validity check. Ends the session if the location can no
    /// longer be fished.
    pub fn check_location(&mut self, env: &impl EnvironmentContext) -> Vec<SessionEvent> {
        if self.state == SessionState::Inactive {
            return Vec::new();
        }
        match LocationContext::resolve(env, &self.location.location) {
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!("stopping fishing for {}: {}", self.angler, e);
                self.cancel()
            }
        }
    }

    /// Advances the session by one fixed tick.
    pub fn tick(
        &mut self,
        save: &mut FishingSave,
        signals: TickSignals,
        rng: &mut impl Rng,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state == SessionState::Inactive {
            return events;
        }

        self.tick_count += 1;
        self.state_ticks += 1;

        match self.state {
            SessionState::Idle | SessionState::Inactive => {}
            SessionState::Casting => self.tick_casting(save, rng, &mut events),
            SessionState::Reeling => self.tick_reeling(save, rng, &mut events),
            SessionState::Hooked => self.tick_hooked(save, rng, &mut events),
            SessionState::Caught => {
                if !signals.presentation_busy {
                    self.set_state(SessionState::Idle, &mut events);
                }
            }
        }

        events
    }

    fn tick_casting(
        &mut self,
        save: &FishingSave,
        rng: &mut impl Rng,
        events: &mut Vec<SessionEvent>,
    ) {
        let elapsed = self.state_elapsed();
        self.bob_distance =
            ((elapsed - self.tuning.cast_delay) / self.tuning.cast_duration).clamp(0.0, 1.0);

        if elapsed + TIME_EPSILON >= self.tuning.cast_time {
            self.bob_distance = 1.0;
            self.hook_threshold = roll_hook_threshold(&self.tuning, save.failed_attempts, rng);
            self.set_state(SessionState::Reeling, events);
        }
    }

    fn tick_reeling(
        &mut self,
        save: &mut FishingSave,
        rng: &mut impl Rng,
        events: &mut Vec<SessionEvent>,
    ) {
        if self.reel_held {
            self.bob_distance -= self.tuning.reeling_speed * self.tuning.tick_seconds;
        }

        if self.bob_distance < self.hook_threshold {
            save.reset_failed_attempts();
            self.hook_fish(save, rng);
            events.push(SessionEvent::CastResolved { hooked: true });
            self.set_state(SessionState::Hooked, events);
            if let Some(fish) = &self.fish {
                events.push(SessionEvent::FishHooked(fish.clone()));
            }
        } else if self.bob_distance <= 0.0 {
            save.record_failed_attempt();
            let gained = save
                .profile_mut(&self.angler, self.role)
                .increase_skill(self.tuning.skill_gain_empty_reel);
            debug!(
                "nothing biting, failed attempts = {}, skill +{:.2}",
                save.failed_attempts, gained
            );
            events.push(SessionEvent::CastResolved { hooked: false });
            self.set_state(SessionState::Idle, events);
        }
    }

    fn hook_fish(&mut self, save: &mut FishingSave, rng: &mut impl Rng) {
        let fish = generate_fish(&self.location, self.now(), &self.tuning, rng);
        let skill_factor = save.profile_mut(&self.angler, self.role).skill_factor();
        let difficulty = fish.effective_difficulty();

        self.rod_window = self.tuning.rod_window_ratio * skill_factor;
        self.catch_speed = self.tuning.fish_catch_speed * skill_factor / difficulty;
        self.escape_speed = self.tuning.fish_escape_speed * difficulty / skill_factor;
        debug!(
            "hooked {:.1} kg {} fish, difficulty {:.2}, catch {:.3}/s, escape {:.3}/s",
            fish.weight,
            fish.tier.name(),
            difficulty,
            self.catch_speed,
            self.escape_speed
        );
        self.fish = Some(fish);
    }

    fn tick_hooked(
        &mut self,
        save: &mut FishingSave,
        rng: &mut impl Rng,
        events: &mut Vec<SessionEvent>,
    ) {
        let dt = self.tuning.tick_seconds;

        if self.rod_on_fish() {
            // Slack only builds while the reel is released
            if !self.reel_held {
                let gained = self.catch_speed * dt;
                self.leeway = (self.leeway + gained).min(self.tuning.max_rod_leeway);
            }
        } else {
            self.leeway -= self.escape_speed * dt;
            if self.leeway < 0.0 {
                // Overflow pulls the bob away from the rod
                self.bob_distance -= self.leeway;
                self.leeway = 0.0;
            }
        }

        if self.reel_held && self.leeway > 0.0 {
            let pull = (self.hooked_reeling_speed * dt).min(self.leeway);
            self.leeway -= pull;
            self.bob_distance -= pull;
        }

        let now = self.now();
        let Some(fish) = self.fish.as_mut() else {
            self.set_state(SessionState::Idle, events);
            return;
        };
        tick_fish(fish, now, &self.tuning, rng);

        if self.bob_distance > 1.0 {
            self.fish_escaped(save, events);
        } else if self.bob_distance < 0.0 {
            self.fish_caught(save, events);
        }
    }

    fn fish_escaped(&mut self, save: &mut FishingSave, events: &mut Vec<SessionEvent>) {
        let gained = save
            .profile_mut(&self.angler, self.role)
            .increase_skill(self.tuning.skill_gain_missed);
        info!("the fish got away from {} (skill +{:.2})", self.angler, gained);
        events.push(SessionEvent::FishEscaped);
        self.set_state(SessionState::Idle, events);
    }

    fn fish_caught(&mut self, save: &mut FishingSave, events: &mut Vec<SessionEvent>) {
        let Some(fish) = self.fish.clone() else {
            self.set_state(SessionState::Idle, events);
            return;
        };

        let profile = save.profile_mut(&self.angler, self.role);
        let new_record = profile.record_catch(&self.location.location, &fish);
        let skill_gained = profile.increase_skill(self.tuning.skill_gain_caught);
        let reward = CatchReward {
            skill_gained,
            new_record,
            caught_count: profile.fish_count(&self.location.location),
        };
        info!(
            "{} caught a {:.1} kg fish at {}{}",
            self.angler,
            fish.weight,
            self.location.location,
            if new_record { " (new record)" } else { "" }
        );

        self.set_state(SessionState::Caught, events);
        events.push(SessionEvent::FishCaught { fish, reward });
    }

    fn set_state(&mut self, new_state: SessionState, events: &mut Vec<SessionEvent>) {
        debug!(
            "fishing state {} -> {}",
            self.state.name(),
            new_state.name()
        );

        match new_state {
            SessionState::Idle => {
                self.fish = None;
                self.leeway = 0.0;
                self.hook_threshold = NO_HOOK_SENTINEL;
            }
            SessionState::Casting => {
                self.bob_distance = 0.0;
            }
            SessionState::Reeling => {}
            SessionState::Hooked => {
                self.rod_position = ROD_START_POSITION;
                self.leeway = 0.0;
                self.hook_threshold = NO_HOOK_SENTINEL;
            }
            SessionState::Caught => {}
            SessionState::Inactive => {
                self.fish = None;
                self.reel_held = false;
                self.bob_distance = 0.0;
                self.leeway = 0.0;
                self.rod_position = ROD_START_POSITION;
                self.hook_threshold = NO_HOOK_SENTINEL;
            }
        }

        self.state = new_state;
        self.state_ticks = 0;
        events.push(SessionEvent::StateChanged(new_state));
    }
}

/// Decides whether this cast gets a bite, and at what bob distance.
///
/// Returns a threshold in `[hook_threshold_min, hook_threshold_max]` on a bite,
/// or the negative sentinel otherwise. The bob never reaches the sentinel
/// before the empty-reel check at zero fires.
pub fn roll_hook_threshold(
    tuning: &FishingTuning,
    failed_attempts: u32,
    rng: &mut impl Rng,
) -> f64 {
    let catch_chance = tuning.catch_chance(failed_attempts);
    let bite = catch_chance >= 1.0 || rng.gen::<f64>() < catch_chance;
    let threshold = if bite {
        tuning.hook_threshold_min
            + rng.gen::<f64>() * (tuning.hook_threshold_max - tuning.hook_threshold_min)
    } else {
        NO_HOOK_SENTINEL
    };
    debug!(
        "catch chance {:.3} after {} failed attempts, hook threshold {:.3}",
        catch_chance, failed_attempts, threshold
    );
    threshold
}
