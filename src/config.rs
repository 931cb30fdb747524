//! Application-level configuration constants.

// Participants
pub const MIN_LANES: usize = 1;
pub const MAX_LANES: usize = 9;
pub const DEFAULT_LANES: usize = 7;

// Track
pub const TRACK_LENGTH: usize = 80;
pub const DIFFICULT_FACTOR: f64 = 0.8;
pub const NORMAL_FACTOR: f64 = 1.0;
pub const FAVORABLE_FACTOR: f64 = 1.2;
/// Share of normal cells; the rest is split evenly between difficult and favorable.
pub const NORMAL_TERRAIN_SHARE: f64 = 0.7;

// UI Behavior
pub const TICK_MS: u32 = 300;
pub const EVENT_LOG_CAPACITY: usize = 3;
pub const LAST_PLACE_COUNT: usize = 2;
pub const HORSE_GLYPH: &str = "🏇";
pub const TRACK_DOT: &str = "·";

// Horse stat ranges (half-open)
pub const BASE_SPEED_RANGE: (f64, f64) = (0.5, 1.5);
pub const ENDURANCE_RANGE: (f64, f64) = (0.5, 1.5);
pub const BURST_CHANCE_RANGE: (f64, f64) = (0.0, 0.2);
pub const BURST_POWER_RANGE: (f64, f64) = (1.5, 3.0);

// Movement model
pub const FATIGUE_CAP: f64 = 0.5;
pub const FATIGUE_ENDURANCE_SCALE: f64 = 20.0;
pub const FATIGUE_STEP_MIN: f64 = 0.1;
pub const FATIGUE_STEP_SPREAD: f64 = 0.1;
pub const MOVE_ONE_THRESHOLD: f64 = 0.7;
pub const MOVE_TWO_THRESHOLD: f64 = 0.4;
pub const MOVE_THREE_THRESHOLD: f64 = 0.15;
pub const SLOW_TERRAIN_EVENT_CHANCE: f64 = 0.3;
pub const SLOW_TERRAIN_BELOW: f64 = 0.9;
pub const GOOD_TERRAIN_ABOVE: f64 = 1.1;

pub const HORSE_NAMES: [&str; 9] = [
    "Christian", "Juan", "Angel", "Daniel", "Simon", "Camilo", "Julio", "Diana", "Vlad",
];

/// CSS classes used to tint each horse.
pub const HORSE_COLORS: [&str; 12] = [
    "horse-red",
    "horse-blue",
    "horse-green",
    "horse-yellow",
    "horse-purple",
    "horse-pink",
    "horse-orange",
    "horse-teal",
    "horse-indigo",
    "horse-rose",
    "horse-emerald",
    "horse-amber",
];

pub const DEFAULT_HORSE_IMAGES: [(&str, &str); 9] = [
    ("Christian", "https://i.postimg.cc/P585mMKm/horse-chr-removebg-preview.png"),
    ("Juan", "https://i.postimg.cc/K8nyGpJs/Juan-removebg-preview.png"),
    ("Angel", "https://i.postimg.cc/dVMYKcmy/Angel-removebg-preview.png"),
    ("Daniel", "https://i.postimg.cc/wBQHV4Ns/Daniel-removebg-preview.png"),
    ("Simon", "https://i.postimg.cc/6pmmK5vc/caballo-simon.png"),
    ("Camilo", "https://i.postimg.cc/0NP1bG45/Camilo-removebg-preview.png"),
    ("Julio", "https://i.postimg.cc/0NnRmMgY/Julio-removebg-preview.png"),
    ("Diana", "https://i.postimg.cc/G275bVVY/Diana-removebg-previe.png"),
    ("Vlad", "https://i.postimg.cc/X7GF3RQ5/Vlad.png"),
];

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
