//! Dot behavior rules and their configuration
//!
//! Each rule is independently gated by its toggle in [`DotConfig`] and is
//! applied in a fixed order by [`crate::sim::Dot::update`]:
//! wander, flee, pulse-and-vanish, relocate, then integration.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::{Matrix, Vector};
use crate::consts::*;
use crate::renderer::Color;
use crate::{bound, random_point};

/// Tuning for one kind of dot. Read-only once handed to a dot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    pub color: Color,
    /// Initial speed along +x (pixels/s)
    pub speed: f32,
    /// Base radius; pulsing stays within `[radius, 2 * radius]`
    pub radius: f32,
    /// Wander: max turn per frame (radians, spread over `[-r/2, r/2]`)
    pub random_dir: Option<f32>,
    /// Flee: strength of the push away from the pointer
    pub run_away: Option<f32>,
    /// Pulse-and-vanish: seconds of pulsing before the dot fades out
    pub hide_in: Option<f32>,
    /// Relocate: seconds between jumps
    pub teleport_in: Option<f32>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            color: Color::Black,
            speed: DEFAULT_DOT_SPEED,
            radius: DEFAULT_DOT_RADIUS,
            random_dir: None,
            run_away: None,
            hide_in: None,
            teleport_in: None,
        }
    }
}

/// Zero or negative toggles count as absent
#[inline]
fn active(toggle: Option<f32>) -> Option<f32> {
    toggle.filter(|v| *v > 0.0)
}

impl DotConfig {
    pub fn wander(&self) -> Option<f32> {
        active(self.random_dir)
    }

    pub fn flee(&self) -> Option<f32> {
        active(self.run_away)
    }

    pub fn pulse(&self) -> Option<f32> {
        active(self.hide_in)
    }

    pub fn relocate(&self) -> Option<f32> {
        active(self.teleport_in)
    }
}

/// The standard dot presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotPreset {
    /// Fast, wanders randomly
    Green,
    /// Stationary until the pointer comes near, then runs
    Red,
    /// Pulses in size, then turns invisible
    Blue,
    /// Small, jumps to a new spot every couple of seconds
    Black,
}

impl DotPreset {
    pub const ALL: [DotPreset; 4] = [
        DotPreset::Green,
        DotPreset::Red,
        DotPreset::Blue,
        DotPreset::Black,
    ];

    /// Stock configuration for this preset
    pub fn default_config(self) -> DotConfig {
        match self {
            DotPreset::Green => DotConfig {
                color: Color::Green,
                random_dir: Some(1.4),
                speed: 250.0,
                ..Default::default()
            },
            DotPreset::Red => DotConfig {
                color: Color::Red,
                speed: 0.0,
                run_away: Some(100.0),
                ..Default::default()
            },
            DotPreset::Blue => DotConfig {
                color: Color::Blue,
                speed: 0.0,
                hide_in: Some(0.8),
                ..Default::default()
            },
            DotPreset::Black => DotConfig {
                color: Color::Black,
                speed: 0.0,
                teleport_in: Some(2.2),
                radius: 30.0,
                ..Default::default()
            },
        }
    }

    fn index(self) -> usize {
        match self {
            DotPreset::Green => 0,
            DotPreset::Red => 1,
            DotPreset::Blue => 2,
            DotPreset::Black => 3,
        }
    }
}

/// Preset configs as supplied by [`crate::GameConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetTable {
    pub green: DotConfig,
    pub red: DotConfig,
    pub blue: DotConfig,
    pub black: DotConfig,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self {
            green: DotPreset::Green.default_config(),
            red: DotPreset::Red.default_config(),
            blue: DotPreset::Blue.default_config(),
            black: DotPreset::Black.default_config(),
        }
    }
}

/// Shared, immutable preset configs, built once per stage
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    configs: [Arc<DotConfig>; 4],
}

impl PresetRegistry {
    pub fn new(table: &PresetTable) -> Self {
        Self {
            configs: [
                Arc::new(table.green.clone()),
                Arc::new(table.red.clone()),
                Arc::new(table.blue.clone()),
                Arc::new(table.black.clone()),
            ],
        }
    }

    pub fn get(&self, preset: DotPreset) -> &Arc<DotConfig> {
        &self.configs[preset.index()]
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new(&PresetTable::default())
    }
}

/// Wander: rotate `vel` by a uniform angle in `[-turn/2, turn/2)`
pub fn wander<R: Rng + ?Sized>(vel: Vector, turn: f32, rng: &mut R) -> Vector {
    let angle = (rng.random::<f32>() - 0.5) * turn;
    vel.xform(Matrix::rot(angle))
}

/// Flee: velocity pointing away from the pointer, stronger when it is close.
///
/// Magnitude is `strength^2 / (radius/4 + distance)`. A pointer exactly on the
/// center pushes along +x.
pub fn flee(pos: Vector, pointer: Vector, radius: f32, strength: f32) -> Vector {
    let diff = pos.sub(pointer);
    let dir = diff.normal_or(Vector::new(1.0, 0.0));
    let denom = (radius / 4.0 + diff.length()).max(FLEE_MIN_DENOMINATOR);
    dir.multiply(strength * strength / denom)
}

/// Pulse-and-vanish state for one dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Seconds of pulsing left
    pub remaining: f32,
}

impl Pulse {
    /// Advance the pulse by one frame. Returns true once the dot has vanished.
    ///
    /// While time remains the radius steps by one unit (grow with
    /// `grow_chance`, else shrink) within `[base, 2 * base]`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        body: &mut Body,
        base_radius: f32,
        dt: f32,
        grow_chance: f64,
        rng: &mut R,
    ) -> bool {
        if self.remaining > TIMER_EPSILON {
            self.remaining -= dt;
            let step = if rng.random_bool(grow_chance.clamp(0.0, 1.0)) { 1.0 } else { -1.0 };
            body.radius = bound(body.radius + step, base_radius, 2.0 * base_radius);
        }
        self.remaining <= TIMER_EPSILON
    }
}

/// Periodic relocation state for one dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocate {
    pub remaining: f32,
}

impl Relocate {
    /// Advance the countdown; on expiry jump to a random in-bounds point and rearm.
    /// Returns true when the body was moved.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        body: &mut Body,
        interval: f32,
        dt: f32,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> bool {
        if self.remaining > TIMER_EPSILON {
            self.remaining -= dt;
        }
        if self.remaining <= TIMER_EPSILON {
            self.remaining = interval;
            body.pos = random_point(rng, body.radius, width, height);
            true
        } else {
            false
        }
    }
}
