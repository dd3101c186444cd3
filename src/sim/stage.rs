//! Stage state: entities, clock, counters and pointer
//!
//! Frame logic lives in `tick.rs`; this module owns construction and the
//! bookkeeping helpers the frame logic builds on.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::behavior::{DotConfig, DotPreset, PresetRegistry};
use super::entity::{Entity, TextFn};
use super::vector::Vector;
use crate::config::GameConfig;
use crate::consts::*;
use crate::random_point;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cleared the final level
    Won,
    /// The countdown reached zero
    TimedOut,
}

/// Live values shown by HUD texts
#[derive(Debug, Clone, PartialEq)]
pub struct HudStatus {
    pub level: u32,
    pub clicks: u32,
    pub time_remaining: f32,
    pub outcome: Option<Outcome>,
}

/// Status line: level, clicks and remaining time
pub fn status_text(s: &HudStatus) -> String {
    format!(
        "level: {}  clicks: {}  Time: {:.1}",
        s.level, s.clicks, s.time_remaining
    )
}

/// Banner shown once the run is over
pub fn outcome_text(s: &HudStatus) -> String {
    match s.outcome {
        Some(Outcome::Won) => "WINNER".to_string(),
        _ => "GAME OVER".to_string(),
    }
}

/// Simulation root and level-progression controller
#[derive(Debug, Clone)]
pub struct Stage {
    pub config: GameConfig,
    pub presets: PresetRegistry,
    pub rng: Pcg32,
    pub width: f32,
    pub height: f32,
    /// Insertion-ordered entity list
    pub entities: Vec<Entity>,
    pub clicks: u32,
    /// Countdown in seconds
    pub time_remaining: f32,
    pub level: u32,
    /// Live dots; `DOT_COUNT_ENDED` once the run is over
    pub dot_count: i32,
    /// Latest pointer position (page coordinates)
    pub pointer: Vector,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
    /// Frames simulated so far
    pub frame: u64,
    /// Host timestamp (ms) of the previous tick
    pub(crate) last_tick_ms: Option<f64>,
    next_id: u32,
}

impl Stage {
    /// Create a stage with the status HUD attached and no dots yet
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut stage = Self {
            presets: PresetRegistry::new(&config.presets),
            rng: Pcg32::seed_from_u64(seed),
            width: INITIAL_WIDTH,
            height: INITIAL_HEIGHT,
            entities: Vec::new(),
            clicks: 0,
            time_remaining: config.start_time,
            level: 0,
            dot_count: 0,
            pointer: Vector::ZERO,
            game_over: false,
            outcome: None,
            frame: 0,
            last_tick_ms: None,
            next_id: 1,
            config,
        };

        let pos = stage.config.hud.status_pos;
        stage.spawn_text(pos, status_text);

        stage
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn status(&self) -> HudStatus {
        HudStatus {
            level: self.level,
            clicks: self.clicks,
            time_remaining: self.time_remaining,
            outcome: self.outcome,
        }
    }

    /// Attach a text entity; returns its ID
    pub fn spawn_text(&mut self, pos: Vector, text: TextFn) -> u32 {
        let id = self.next_entity_id();
        let hud = &self.config.hud;
        let entity = Entity::text(id, pos, text, &hud.font, hud.color);
        self.entities.push(entity);
        id
    }

    /// Attach a stock `preset` dot at a random in-bounds position
    pub fn spawn_dot(&mut self, preset: DotPreset) -> u32 {
        let config = Arc::clone(self.presets.get(preset));
        self.spawn_dot_with(config)
    }

    /// Attach a dot at a random in-bounds position and count it as live
    pub fn spawn_dot_with(&mut self, config: Arc<DotConfig>) -> u32 {
        let pos = random_point(&mut self.rng, config.radius, self.width, self.height);
        let id = self.next_entity_id();
        log::debug!(
            "spawned {:?} dot #{} at ({:.0}, {:.0}), radius {:.1}",
            config.color,
            id,
            pos.x,
            pos.y,
            config.radius
        );
        self.entities.push(Entity::dot(id, pos, config));
        self.dot_count += 1;
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Dots not yet clicked
    pub fn live_dots(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_dot() && !e.destroyed)
    }

    /// Drop entities marked destroyed during the previous frame
    pub fn prune_destroyed(&mut self) {
        self.entities.retain(|e| !e.destroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stage_defaults() {
        let stage = Stage::new(GameConfig::default(), 1);
        assert_eq!(stage.time_remaining, 8.0);
        assert_eq!(stage.level, 0);
        assert_eq!(stage.dot_count, 0);
        assert_eq!(stage.clicks, 0);
        assert!(!stage.game_over);
        // Only the status HUD
        assert_eq!(stage.entities.len(), 1);
        assert!(!stage.entities[0].is_dot());
    }

    #[test]
    fn test_spawn_dot_counts_and_respects_margin() {
        let mut stage = Stage::new(GameConfig::default(), 2);
        stage.resize(800.0, 600.0);
        let id = stage.spawn_dot(DotPreset::Black);
        assert_eq!(stage.dot_count, 1);
        let dot = stage.entity(id).unwrap();
        assert!(dot.body.pos.x >= 30.0 && dot.body.pos.x <= 770.0);
        assert!(dot.body.pos.y >= 30.0 && dot.body.pos.y <= 570.0);
        assert_eq!(stage.live_dots().count(), 1);
    }

    #[test]
    fn test_entity_ids_are_unique_and_ordered() {
        let mut stage = Stage::new(GameConfig::default(), 3);
        let a = stage.spawn_dot(DotPreset::Green);
        let b = stage.spawn_dot(DotPreset::Red);
        assert!(b > a);
        let ids: Vec<u32> = stage.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, a, b]);
    }

    #[test]
    fn test_prune_removes_only_destroyed() {
        let mut stage = Stage::new(GameConfig::default(), 4);
        let a = stage.spawn_dot(DotPreset::Green);
        let b = stage.spawn_dot(DotPreset::Green);
        stage.entity_mut(a).unwrap().destroyed = true;
        stage.prune_destroyed();
        assert!(stage.entity(a).is_none());
        assert!(stage.entity(b).is_some());
        assert_eq!(stage.entities.len(), 2);
    }

    #[test]
    fn test_hud_texts() {
        let mut status = HudStatus {
            level: 2,
            clicks: 5,
            time_remaining: 12.345,
            outcome: None,
        };
        assert_eq!(status_text(&status), "level: 2  clicks: 5  Time: 12.3");
        assert_eq!(outcome_text(&status), "GAME OVER");
        status.outcome = Some(Outcome::Won);
        assert_eq!(outcome_text(&status), "WINNER");
    }
}
