// Simulation step
pub const FIXED_TICK_SECONDS: f64 = 0.02;

// Casting
pub const CAST_DELAY_SECONDS: f64 = 1.2;
pub const CAST_DURATION_SECONDS: f64 = 0.4;
pub const CAST_TIME_SECONDS: f64 = 2.0;

// Reeling
pub const REELING_SPEED: f64 = 0.2;
pub const HOOKED_REELING_SPEED: f64 = 0.12;
pub const HOOK_THRESHOLD_MIN: f64 = 0.25;
pub const HOOK_THRESHOLD_MAX: f64 = 0.80;
/// Below any reachable bob distance: a cast holding this threshold never bites.
pub const NO_HOOK_SENTINEL: f64 = -1.0;
/// Failed casts + 1 divided by this gives the bite chance. At K-1 failures a bite is certain.
pub const CATCH_CHANCE_DIVISOR: u32 = 6;

// Hooked fight
pub const FISH_CATCH_SPEED: f64 = 0.1;
pub const FISH_ESCAPE_SPEED: f64 = 0.1;
pub const MAX_ROD_LEEWAY: f64 = 0.1;
pub const ROD_WINDOW_RATIO: f64 = 0.1;
pub const ROD_DELTA: f64 = 0.04;
pub const ROD_START_POSITION: f64 = 0.5;

// Fish movement
pub const FISH_MIN_SPEED: f64 = 0.025;
pub const FISH_MAX_SPEED: f64 = 0.15;
pub const FISH_MAX_CHANGE_TIME: f64 = 0.75;
pub const FISH_MIN_SPEED_SCALE: f64 = 0.25;
pub const FISH_START_POSITION: f64 = 0.5;

// Fish size
pub const MIN_FISH_DIFFICULTY: f64 = 0.5;
pub const POND_MIN_WEIGHT: f64 = 0.1;
pub const DEFAULT_MIN_WEIGHT: f64 = 1.0;

// Terrain height cutoffs for ocean tiers (metres, negative = below sea level)
pub const COASTAL_MIN_HEIGHT: f64 = -150.0;
pub const OCEAN_MIN_HEIGHT: f64 = -1000.0;
pub const DEEP_OCEAN_MIN_HEIGHT: f64 = -2500.0;

// Location difficulty
pub const RICHNESS_DIVISOR: f64 = 10.0;
pub const MIN_LOCATION_DIFFICULTY: f64 = 0.1;

// Skill
pub const MAX_SKILL: f64 = 100.0;
pub const SKILL_GAIN_EMPTY_REEL: f64 = 0.1;
pub const SKILL_GAIN_MISSED: f64 = 0.5;
pub const SKILL_GAIN_CAUGHT: f64 = 1.5;
pub const ENGINEER_STARTING_SKILL: f64 = 20.0;
pub const SCIENTIST_STARTING_SKILL: f64 = 10.0;

// Persistence
pub const SAVE_FILE_NAME: &str = "fishing.json";
