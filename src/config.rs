//! Game configuration
//!
//! Balance knobs, dot presets and the level plan. Defaults reproduce the
//! stock game; a JSON override can be kept in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Color;
use crate::sim::{BoundaryPolicy, DotConfig, DotPreset, PresetTable, Vector};

/// Dot radius `scale / n + floor` on the n-th level of a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRamp {
    pub scale: f32,
    pub floor: f32,
}

/// One band of levels and the dots each of its levels spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTier {
    /// Last level (inclusive) covered by this tier
    pub last_level: u32,
    /// One dot per entry is spawned on each level of the tier
    pub presets: Vec<DotPreset>,
    /// Replaces the preset radius, shrinking level by level
    #[serde(default)]
    pub radius_ramp: Option<RadiusRamp>,
    /// Added to the preset speed once per level into the tier (pixels/s)
    #[serde(default)]
    pub speed_step: f32,
}

impl LevelTier {
    /// A tier that spawns its presets unchanged on every level
    pub fn new(last_level: u32, presets: Vec<DotPreset>) -> Self {
        Self {
            last_level,
            presets,
            radius_ramp: None,
            speed_step: 0.0,
        }
    }

    /// `base` adjusted for the tier's `n`-th level (1-based), or None when
    /// the tier does not ramp and the shared preset can be used as is
    pub fn scaled(&self, base: &DotConfig, n: u32) -> Option<DotConfig> {
        if self.radius_ramp.is_none() && self.speed_step == 0.0 {
            return None;
        }

        let n = n.max(1) as f32;
        let mut config = base.clone();
        if let Some(ramp) = self.radius_ramp {
            config.radius = ramp.scale / n + ramp.floor;
        }
        config.speed += self.speed_step * n;
        Some(config)
    }
}

/// Placement and look of the HUD texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudStyle {
    pub status_pos: Vector,
    pub outcome_pos: Vector,
    pub font: String,
    pub color: Color,
}

impl Default for HudStyle {
    fn default() -> Self {
        Self {
            status_pos: Vector::new(10.0, 50.0),
            outcome_pos: Vector::new(20.0, 120.0),
            font: "48px serif".to_string(),
            color: Color::Black,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Clock ===
    /// Countdown at the start of a run (seconds)
    pub start_time: f32,
    /// Added on every level-up (seconds)
    pub level_time_bonus: f32,
    /// Deducted on every pointer-down (seconds)
    pub click_penalty: f32,

    // === Motion ===
    pub boundary: BoundaryPolicy,

    // === Dots ===
    pub presets: PresetTable,
    /// Color a pulsing dot takes once its pulse has run out
    pub vanished_color: Color,
    /// Per-frame chance a pulsing dot grows rather than shrinks
    pub pulse_grow_chance: f64,

    // === Progression ===
    /// Ordered by `last_level`; the last tier's `last_level` is the final level
    pub tiers: Vec<LevelTier>,

    // === HUD ===
    pub hud: HudStyle,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_time: START_TIME,
            level_time_bonus: LEVEL_TIME_BONUS,
            click_penalty: CLICK_PENALTY,

            boundary: BoundaryPolicy::Clamp,

            presets: PresetTable::default(),
            vanished_color: Color::White,
            pulse_grow_chance: PULSE_GROW_CHANCE,

            tiers: vec![
                LevelTier {
                    radius_ramp: Some(RadiusRamp { scale: 70.0, floor: 10.0 }),
                    ..LevelTier::new(5, vec![DotPreset::Green])
                },
                LevelTier::new(10, vec![DotPreset::Red]),
                LevelTier::new(15, vec![DotPreset::Blue, DotPreset::Blue]),
                LevelTier {
                    speed_step: 70.0,
                    ..LevelTier::new(20, vec![DotPreset::Black])
                },
            ],

            hud: HudStyle::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Highest playable level; clearing it wins the game
    pub fn max_level(&self) -> u32 {
        self.tiers.iter().map(|t| t.last_level).max().unwrap_or(0)
    }

    /// Tier covering `level` and the level's 1-based position inside it,
    /// or None past the final level
    pub fn tier_for_level(&self, level: u32) -> Option<(&LevelTier, u32)> {
        let tier = self
            .tiers
            .iter()
            .filter(|t| level <= t.last_level)
            .min_by_key(|t| t.last_level)?;
        let before = self
            .tiers
            .iter()
            .map(|t| t.last_level)
            .filter(|&last| last < tier.last_level)
            .max()
            .unwrap_or(0);
        Some((tier, level.saturating_sub(before)))
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dot_rush_config";

    /// Load a config override from LocalStorage (WASM only).
    ///
    /// With nothing stored yet the defaults are written back so there is a
    /// template to edit. A stored value that fails to parse is left alone.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("No LocalStorage, using default config");
            return Self::default();
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from LocalStorage");
                    return config;
                }
                Err(e) => log::warn!("Ignoring stored config: {}", e),
            },
            Ok(None) => {
                log::info!("Using default config");
                let config = Self::default();
                config.save();
                return config;
            }
            Err(_) => log::warn!("LocalStorage read failed"),
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Config saved");
                }
                Err(e) => log::warn!("Config not saved: {}", e),
            }
        }
    }

    /// Native stub: always the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
