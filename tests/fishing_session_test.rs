//! Fishing session integration tests
//!
//! End-to-end runs of the session state machine covering:
//! - Guaranteed bites after a losing streak
//! - Escapes and catches with their skill and record bookkeeping
//! - Location loss mid-fight
//! - Tuning loaded from JSON

use angling::core::{FishingTuning, SKILL_GAIN_CAUGHT, SKILL_GAIN_MISSED};
use angling::environment::{BiomeClass, LocationData, StaticEnvironment};
use angling::fishing::SpeciesTier;
use angling::{
    AnglerRole, FishingInput, FishingSave, FishingSession, SessionError, SessionEvent, SessionState,
    TickSignals,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SHALLOWS: &str = "Kerbin Shallows";
const TRENCH: &str = "Kerbin Trench";
const MAX_TICKS: u32 = 200_000;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn create_test_env() -> StaticEnvironment {
    StaticEnvironment::new()
        .with_location(SHALLOWS, LocationData::water(-40.0))
        .with_location(TRENCH, LocationData::water(-2000.0).with_richness(4.0))
}

/// Casts and reels until the cast resolves. Returns every event seen.
fn cast_and_reel(
    session: &mut FishingSession,
    save: &mut FishingSave,
    rng: &mut ChaCha8Rng,
) -> Vec<SessionEvent> {
    let mut events = session.handle_input(FishingInput::CastLine);
    events.extend(session.handle_input(FishingInput::ReelDown));

    let mut ticks = 0;
    while matches!(session.state, SessionState::Casting | SessionState::Reeling) {
        events.extend(session.tick(save, TickSignals::default(), rng));
        ticks += 1;
        assert!(ticks < MAX_TICKS, "cast never resolved");
    }
    events
}

fn hooked_session(
    location: &str,
    save: &mut FishingSave,
    rng: &mut ChaCha8Rng,
) -> (FishingSession, Vec<SessionEvent>) {
    save.failed_attempts = 5;
    let mut session =
        FishingSession::start(&create_test_env(), location, "Jeb", AnglerRole::Pilot, save)
            .unwrap();
    let events = cast_and_reel(&mut session, save, rng);
    assert_eq!(session.state, SessionState::Hooked);
    (session, events)
}

// ============================================================================
// Bites
// ============================================================================

#[test]
fn test_losing_streak_guarantees_coastal_bite() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let (session, events) = hooked_session(SHALLOWS, &mut save, &mut rng);

    let fish = session.fish.as_ref().unwrap();
    assert_eq!(fish.tier, SpeciesTier::Coastal);
    assert!(fish.weight >= 1.0);
    assert_eq!(save.failed_attempts, 0);
    assert!(events.contains(&SessionEvent::CastResolved { hooked: true }));
    assert!(events.contains(&SessionEvent::FishHooked(fish.clone())));
}

#[test]
fn test_bite_rate_climbs_with_failures() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let mut session =
        FishingSession::start(&create_test_env(), SHALLOWS, "Jeb", AnglerRole::Pilot, &mut save)
            .unwrap();

    // No more than five empty casts in a row, whatever the dice say
    for _ in 0..20 {
        let events = cast_and_reel(&mut session, &mut save, &mut rng);
        assert!(save.failed_attempts <= 5);
        if events.contains(&SessionEvent::CastResolved { hooked: true }) {
            session.handle_input(FishingInput::Cancel);
            session = FishingSession::start(
                &create_test_env(),
                SHALLOWS,
                "Jeb",
                AnglerRole::Pilot,
                &mut save,
            )
            .unwrap();
        } else {
            assert_eq!(session.state, SessionState::Idle);
        }
    }
}

#[test]
fn test_start_rejects_location_without_biome() {
    struct NoBiome;
    impl angling::EnvironmentContext for NoBiome {
        fn gravity_ratio(&self, _: &str) -> f64 {
            1.0
        }
        fn terrain_height(&self, _: &str) -> Option<f64> {
            Some(-10.0)
        }
        fn biome_class(&self, _: &str) -> Option<BiomeClass> {
            None
        }
        fn is_special_zone(&self, _: &str) -> bool {
            false
        }
        fn local_richness(&self, _: &str) -> f64 {
            0.0
        }
    }

    let mut save = FishingSave::new();
    let result = FishingSession::start(&NoBiome, SHALLOWS, "Jeb", AnglerRole::Pilot, &mut save);
    assert!(matches!(
        result,
        Err(SessionError::Location(angling::LocationError::MissingBiome(_)))
    ));
}

// ============================================================================
// Fight Outcomes
// ============================================================================

#[test]
fn test_rod_kept_off_the_fish_lets_it_escape() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let (mut session, _) = hooked_session(SHALLOWS, &mut save, &mut rng);
    session.handle_input(FishingInput::ReelUp);

    let mut events = Vec::new();
    let mut ticks = 0;
    while session.state == SessionState::Hooked {
        let fish_position = session.fish.as_ref().unwrap().position;
        session.rod_position = if fish_position < 0.5 { 1.0 } else { 0.0 };
        events.extend(session.tick(&mut save, TickSignals::default(), &mut rng));
        ticks += 1;
        assert!(ticks < MAX_TICKS, "fish never escaped");
    }

    assert_eq!(session.state, SessionState::Idle);
    assert!(session.fish.is_none());
    assert!(events.contains(&SessionEvent::FishEscaped));

    let profile = save.profile("Jeb").unwrap();
    assert!((profile.skill - SKILL_GAIN_MISSED).abs() < 1e-12);
    assert_eq!(profile.fish_count(SHALLOWS), 0);
}

#[test]
fn test_holding_reel_through_the_fight_never_lands() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let (mut session, _) = hooked_session(SHALLOWS, &mut save, &mut rng);
    assert!(session.reel_held);
    let hooked_at = session.bob_distance;

    for _ in 0..5000 {
        session.rod_position = session.fish.as_ref().unwrap().position;
        session.tick(&mut save, TickSignals::default(), &mut rng);
    }

    assert_eq!(session.state, SessionState::Hooked);
    assert_eq!(session.bob_distance, hooked_at);
    assert_eq!(save.profile("Jeb").unwrap().fish_count(SHALLOWS), 0);
}

#[test]
fn test_following_the_fish_lands_it() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let (mut session, _) = hooked_session(SHALLOWS, &mut save, &mut rng);

    let mut events = Vec::new();
    let mut ticks = 0;
    while session.state == SessionState::Hooked {
        // Let slack build to the cap, then reel it all in
        if session.leeway >= session.tuning.max_rod_leeway {
            session.handle_input(FishingInput::ReelDown);
        } else if session.leeway <= 0.0 {
            session.handle_input(FishingInput::ReelUp);
        }
        session.rod_position = session.fish.as_ref().unwrap().position;
        events.extend(session.tick(&mut save, TickSignals::default(), &mut rng));
        assert!(session.leeway >= 0.0 && session.leeway <= session.tuning.max_rod_leeway);
        ticks += 1;
        assert!(ticks < MAX_TICKS, "fish never landed");
    }

    assert_eq!(session.state, SessionState::Caught);
    let (fish, reward) = events
        .iter()
        .find_map(|e| match e {
            SessionEvent::FishCaught { fish, reward } => Some((fish.clone(), *reward)),
            _ => None,
        })
        .expect("catch event");

    assert!(reward.new_record);
    assert_eq!(reward.caught_count, 1);
    assert!((reward.skill_gained - SKILL_GAIN_CAUGHT).abs() < 1e-12);

    let profile = save.profile("Jeb").unwrap();
    assert_eq!(profile.fish_count(SHALLOWS), 1);
    assert_eq!(profile.biggest_fish(SHALLOWS), fish.weight);

    // The catch stays on screen until the presentation finishes
    let busy = TickSignals {
        presentation_busy: true,
    };
    session.tick(&mut save, busy, &mut rng);
    assert_eq!(session.state, SessionState::Caught);
    assert!(session.fish.is_some());

    session.tick(&mut save, TickSignals::default(), &mut rng);
    assert_eq!(session.state, SessionState::Idle);
    assert!(session.fish.is_none());
}

#[test]
fn test_deep_trench_fish_fights_harder() {
    let mut rng = create_test_rng();
    let mut shallow_save = FishingSave::new();
    let (shallow, _) = hooked_session(SHALLOWS, &mut shallow_save, &mut rng);
    let mut trench_save = FishingSave::new();
    let (trench, _) = hooked_session(TRENCH, &mut trench_save, &mut rng);

    assert_eq!(trench.fish.as_ref().unwrap().tier, SpeciesTier::DeepOcean);
    assert!(trench.location.difficulty > shallow.location.difficulty);
    assert!(trench.hooked_reeling_speed < shallow.hooked_reeling_speed);
    assert!(trench.escape_speed > shallow.escape_speed);
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[test]
fn test_location_loss_mid_fight_abandons_attempt() {
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let (mut session, _) = hooked_session(SHALLOWS, &mut save, &mut rng);

    let mut env = create_test_env();
    env.remove(SHALLOWS);
    let events = session.check_location(&env);

    assert_eq!(
        events,
        vec![
            SessionEvent::StateChanged(SessionState::Inactive),
            SessionEvent::AttemptAbandoned
        ]
    );
    assert!(!session.is_active());
    assert_eq!(save.profile("Jeb").unwrap().fish_count(SHALLOWS), 0);
    assert!(session
        .tick(&mut save, TickSignals::default(), &mut rng)
        .is_empty());
}

#[test]
fn test_custom_tuning_from_json() {
    let tuning = FishingTuning::from_json(r#"{ "catch_chance_divisor": 1 }"#).unwrap();
    let mut rng = create_test_rng();
    let mut save = FishingSave::new();
    let mut session = FishingSession::start_with_tuning(
        &create_test_env(),
        SHALLOWS,
        "Val",
        AnglerRole::Scientist,
        &mut save,
        tuning,
    )
    .unwrap();

    // With a divisor of one every cast bites
    let events = cast_and_reel(&mut session, &mut save, &mut rng);
    assert!(events.contains(&SessionEvent::CastResolved { hooked: true }));
    assert_eq!(save.profile("Val").unwrap().skill, 10.0);
}
