//! Per-frame cycle and level progression
//!
//! The host calls [`Stage::tick`] once per display refresh with its current
//! timestamp. Within a frame the order is fixed: resize, prune, clock,
//! level-up, update, draw. Pointer events are applied between frames.

use std::sync::Arc;

use super::behavior::DotConfig;
use super::entity::FrameContext;
use super::stage::{Outcome, Stage, outcome_text};
use super::vector::Vector;
use crate::consts::*;
use crate::renderer::Surface;

impl Stage {
    /// Run one frame at host time `now_ms` and draw it onto `surface`.
    ///
    /// The first tick has `dt = 0`; a timestamp earlier than the previous
    /// one is treated the same way.
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        let dt = match self.last_tick_ms {
            Some(then) => (((now_ms - then) / 1000.0) as f32).max(0.0),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        let (width, height) = surface.viewport();
        surface.resize(width, height);
        self.resize(width, height);

        self.step(dt);
        self.draw(surface);
    }

    /// Simulate one frame of `dt` seconds without drawing
    pub fn step(&mut self, dt: f32) {
        self.frame += 1;
        log::trace!("frame {} dt={:.4}", self.frame, dt);

        self.prune_destroyed();

        if !self.game_over {
            if self.time_remaining > dt {
                self.time_remaining -= dt;
            } else {
                self.end_game(Outcome::TimedOut);
            }
        }

        if self.dot_count == 0 && !self.game_over {
            self.levelup();
        }

        let mut ctx = FrameContext {
            width: self.width,
            height: self.height,
            pointer: self.pointer,
            boundary: self.config.boundary,
            vanished_color: self.config.vanished_color,
            pulse_grow_chance: self.config.pulse_grow_chance,
            rng: &mut self.rng,
        };
        for entity in &mut self.entities {
            entity.update(dt, &mut ctx);
        }
    }

    /// Clear the surface and draw every entity in insertion order
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(self.width, self.height);
        let status = self.status();
        for entity in &self.entities {
            entity.draw(surface, &status);
        }
    }

    /// Advance to the next level: bonus time plus the level's wave of dots.
    /// Moving past the final level wins the game. No-op once the run is over.
    pub fn levelup(&mut self) {
        if self.game_over {
            return;
        }

        self.level += 1;
        self.time_remaining += self.config.level_time_bonus;

        let Some((tier, n)) = self.config.tier_for_level(self.level) else {
            self.end_game(Outcome::Won);
            return;
        };

        // Ramped tiers get a fresh config per level; others share the preset
        let wave: Vec<Arc<DotConfig>> = tier
            .presets
            .iter()
            .map(|&preset| {
                let base = self.presets.get(preset);
                match tier.scaled(base, n) {
                    Some(config) => Arc::new(config),
                    None => Arc::clone(base),
                }
            })
            .collect();

        log::info!(
            "Level {} ({} of its tier): {} dot(s), {:.1}s on the clock",
            self.level,
            n,
            wave.len(),
            self.time_remaining
        );
        for config in wave {
            self.spawn_dot_with(config);
        }
    }

    /// Enter the terminal state. Freezes the clock, stops level-ups and
    /// shows the outcome banner. Only the first call has any effect.
    pub fn end_game(&mut self, outcome: Outcome) {
        if self.game_over {
            return;
        }

        self.time_remaining = 0.0;
        self.game_over = true;
        self.outcome = Some(outcome);
        self.dot_count = DOT_COUNT_ENDED;

        let pos = self.config.hud.outcome_pos;
        self.spawn_text(pos, outcome_text);

        log::info!(
            "Game over ({:?}) at level {} after {} clicks",
            outcome,
            self.level,
            self.clicks
        );
    }

    /// Pointer pressed at page coordinates `pos`.
    ///
    /// Every press costs `click_penalty` seconds, hit or miss, and counts
    /// once; each entity under the pointer is then clicked. Ignored after
    /// the game has ended.
    pub fn pointer_down(&mut self, pos: Vector) {
        if self.game_over {
            log::debug!("click ignored, game over");
            return;
        }

        self.clicks += 1;
        self.time_remaining -= self.config.click_penalty;

        let mut hits = 0;
        for entity in &mut self.entities {
            if entity.is_clicked(pos) && entity.click() {
                self.dot_count -= 1;
                hits += 1;
            }
        }
        log::debug!(
            "click at ({:.0}, {:.0}): {} hit(s), {} dot(s) left",
            pos.x,
            pos.y,
            hits,
            self.dot_count
        );
    }

    /// Pointer moved to page coordinates `pos`
    pub fn pointer_move(&mut self, pos: Vector) {
        self.pointer = pos;
    }
}
