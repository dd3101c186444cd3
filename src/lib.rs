//! Dot Rush - click the dots before the clock runs out
//!
//! Core modules:
//! - `sim`: Seeded simulation (entities, behavior rules, level progression)
//! - `renderer`: Drawing-surface contract plus canvas/recording adapters
//! - `config`: Data-driven game balance and presets
//! - `demo`: Headless bot run for the native binary

pub mod config;
pub mod demo;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;

use rand::Rng;

use sim::Vector;

/// Game configuration constants
pub mod consts {
    /// Countdown at the start of a run (seconds)
    pub const START_TIME: f32 = 8.0;
    /// Time granted on every level-up (seconds)
    pub const LEVEL_TIME_BONUS: f32 = 5.0;
    /// Time deducted for every pointer-down, hit or miss (seconds)
    pub const CLICK_PENALTY: f32 = 1.0;

    /// Dot defaults when a preset does not override them
    pub const DEFAULT_DOT_SPEED: f32 = 150.0;
    pub const DEFAULT_DOT_RADIUS: f32 = 40.0;

    /// Chance that a pulsing dot grows (rather than shrinks) on a frame
    pub const PULSE_GROW_CHANCE: f64 = 0.75;

    /// Live-dot counter value once the run has ended
    pub const DOT_COUNT_ENDED: i32 = -1;

    /// Slack on countdown expiry so accumulated f32 frame steps still land
    /// on the frame where the nominal interval runs out
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Floor for the flee-magnitude denominator
    pub const FLEE_MIN_DENOMINATOR: f32 = 1e-3;

    /// Canvas size used before the first resize
    pub const INITIAL_WIDTH: f32 = 512.0;
    pub const INITIAL_HEIGHT: f32 = 480.0;
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` (a canvas
/// narrower than a dot) inputs below `min` yield `min`, everything else `max`.
#[inline]
pub fn bound(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` when the range is empty
#[inline]
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Random point keeping a circle of `radius` fully inside a `width` x `height` area
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, radius: f32, width: f32, height: f32) -> Vector {
    let x = random_in(rng, radius, width - radius);
    let y = random_in(rng, radius, height - radius);
    Vector::new(bound(x, radius, width - radius), bound(y, radius, height - radius))
}
