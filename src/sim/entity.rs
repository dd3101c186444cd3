//! Simulation entities
//!
//! Every participant is an [`Entity`]: shared kinematics in a [`Body`] plus a
//! variant tag. Dispatch is a `match` on the tag rather than trait objects.

use std::sync::Arc;

use rand_pcg::Pcg32;

use super::behavior::{DotConfig, Pulse, Relocate, flee, wander};
use super::body::{Body, BoundaryPolicy};
use super::stage::HudStatus;
use super::vector::Vector;
use crate::consts::TIMER_EPSILON;
use crate::renderer::{Color, Surface};

/// Per-frame view of the stage handed to entity updates
pub struct FrameContext<'a> {
    pub width: f32,
    pub height: f32,
    /// Latest pointer position (page coordinates)
    pub pointer: Vector,
    pub boundary: BoundaryPolicy,
    pub vanished_color: Color,
    pub pulse_grow_chance: f64,
    pub rng: &'a mut Pcg32,
}

/// A clickable, moving circular target
#[derive(Debug, Clone)]
pub struct Dot {
    pub config: Arc<DotConfig>,
    pub color: Color,
    pub pulse: Option<Pulse>,
    pub relocate: Option<Relocate>,
}

impl Dot {
    /// Per-instance state seeded from the shared config
    pub fn new(config: Arc<DotConfig>) -> Self {
        Self {
            color: config.color,
            pulse: config.pulse().map(|remaining| Pulse { remaining }),
            relocate: config.relocate().map(|remaining| Relocate { remaining }),
            config,
        }
    }

    /// Whether the pulse has run out and the dot is drawn in the vanished color
    pub fn has_vanished(&self) -> bool {
        self.pulse.is_some_and(|p| p.remaining <= TIMER_EPSILON)
    }

    /// Apply the behavior rules in order, then integrate
    pub fn update(&mut self, body: &mut Body, dt: f32, ctx: &mut FrameContext<'_>) {
        let config = Arc::clone(&self.config);

        if let Some(turn) = config.wander() {
            body.vel = wander(body.vel, turn, &mut *ctx.rng);
        }

        if let Some(strength) = config.flee() {
            body.vel = flee(body.pos, ctx.pointer, body.radius, strength);
        }

        if let Some(pulse) = self.pulse.as_mut() {
            let vanished = pulse.step(body, config.radius, dt, ctx.pulse_grow_chance, &mut *ctx.rng);
            if vanished {
                self.color = ctx.vanished_color;
            }
        }

        if let (Some(relocate), Some(interval)) = (self.relocate.as_mut(), config.relocate()) {
            if relocate.step(body, interval, dt, ctx.width, ctx.height, &mut *ctx.rng) {
                log::debug!("dot relocated to ({:.0}, {:.0})", body.pos.x, body.pos.y);
            }
        }

        body.integrate(dt, ctx.boundary, ctx.width, ctx.height);
    }
}

/// Produces the text a [`HudText`] shows; evaluated every frame
pub type TextFn = fn(&HudStatus) -> String;

/// Stationary text overlay
#[derive(Debug, Clone)]
pub struct HudText {
    pub text: TextFn,
    pub font: String,
    pub color: Color,
}

/// Variant tag plus variant-specific state
#[derive(Debug, Clone)]
pub enum EntityKind {
    Dot(Dot),
    Text(HudText),
}

/// Anything living in the stage's entity list
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub body: Body,
    /// Set when the entity should be pruned at the start of the next frame
    pub destroyed: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn dot(id: u32, pos: Vector, config: Arc<DotConfig>) -> Self {
        let mut body = Body::new(pos, config.radius);
        body.vel = Vector::new(config.speed, 0.0);
        Self {
            id,
            body,
            destroyed: false,
            kind: EntityKind::Dot(Dot::new(config)),
        }
    }

    /// Text entities are radius-1 bodies that never move
    pub fn text(id: u32, pos: Vector, text: TextFn, font: &str, color: Color) -> Self {
        Self {
            id,
            body: Body::new(pos, 1.0),
            destroyed: false,
            kind: EntityKind::Text(HudText {
                text,
                font: font.to_string(),
                color,
            }),
        }
    }

    pub fn is_dot(&self) -> bool {
        matches!(self.kind, EntityKind::Dot(_))
    }

    pub fn as_dot(&self) -> Option<&Dot> {
        match &self.kind {
            EntityKind::Dot(dot) => Some(dot),
            EntityKind::Text(_) => None,
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        match &mut self.kind {
            EntityKind::Dot(dot) => dot.update(&mut self.body, dt, ctx),
            // Pinned to its screen position regardless of viewport size
            EntityKind::Text(_) => {}
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, status: &HudStatus) {
        match &self.kind {
            EntityKind::Dot(dot) => surface.fill_circle(self.body.pos, self.body.radius, dot.color),
            EntityKind::Text(hud) => {
                let text = (hud.text)(status);
                surface.fill_text(&text, self.body.pos, &hud.font, hud.color);
            }
        }
    }

    /// Circle hit test at the current (possibly pulsed) radius
    pub fn is_clicked(&self, point: Vector) -> bool {
        match self.kind {
            EntityKind::Dot(_) => !self.destroyed && self.body.contains(point),
            EntityKind::Text(_) => false,
        }
    }

    /// Mark for removal. Returns true if a live dot was destroyed.
    pub fn click(&mut self) -> bool {
        match self.kind {
            EntityKind::Dot(_) if !self.destroyed => {
                self.destroyed = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::sim::behavior::{DotPreset, PresetRegistry};
    use rand::SeedableRng;

    fn ctx(rng: &mut Pcg32) -> FrameContext<'_> {
        FrameContext {
            width: 800.0,
            height: 600.0,
            pointer: Vector::ZERO,
            boundary: BoundaryPolicy::Clamp,
            vanished_color: Color::White,
            pulse_grow_chance: 0.75,
            rng,
        }
    }

    fn status() -> HudStatus {
        HudStatus {
            level: 3,
            clicks: 7,
            time_remaining: 4.25,
            outcome: None,
        }
    }

    #[test]
    fn test_dot_seeds_state_from_config() {
        let registry = PresetRegistry::default();
        let e = Entity::dot(1, Vector::new(100.0, 100.0), registry.get(DotPreset::Green).clone());
        assert_eq!(e.body.vel, Vector::new(250.0, 0.0));
        assert_eq!(e.body.radius, 40.0);
        let dot = e.as_dot().unwrap();
        assert_eq!(dot.color, Color::Green);
        assert!(dot.pulse.is_none() && dot.relocate.is_none());

        let e = Entity::dot(2, Vector::ZERO, registry.get(DotPreset::Blue).clone());
        assert_eq!(e.as_dot().unwrap().pulse, Some(Pulse { remaining: 0.8 }));
    }

    #[test]
    fn test_pulse_dot_vanishes_but_stays_clickable() {
        let mut rng = Pcg32::seed_from_u64(42);
        let registry = PresetRegistry::default();
        let mut e = Entity::dot(1, Vector::new(400.0, 300.0), registry.get(DotPreset::Blue).clone());

        for _ in 0..4 {
            e.update(0.25, &mut ctx(&mut rng));
        }

        let dot = e.as_dot().unwrap();
        assert!(dot.pulse.unwrap().remaining <= 0.0);
        assert!(dot.has_vanished());
        assert_eq!(dot.color, Color::White);
        assert!(e.is_clicked(Vector::new(400.0, 300.0)));
    }

    #[test]
    fn test_teleport_dot_relocates_after_interval() {
        let mut rng = Pcg32::seed_from_u64(9);
        let registry = PresetRegistry::default();
        let mut e = Entity::dot(1, Vector::new(400.0, 300.0), registry.get(DotPreset::Black).clone());

        e.update(1.1, &mut ctx(&mut rng));
        assert_eq!(e.body.pos, Vector::new(400.0, 300.0));

        e.update(2.2, &mut ctx(&mut rng));
        let dot = e.as_dot().unwrap();
        assert_eq!(dot.relocate.unwrap().remaining, 2.2);
        assert_ne!(e.body.pos, Vector::new(400.0, 300.0));
        assert!(e.body.pos.x >= 30.0 && e.body.pos.x <= 770.0);
        assert!(e.body.pos.y >= 30.0 && e.body.pos.y <= 570.0);
    }

    #[test]
    fn test_flee_dot_moves_away_from_pointer() {
        let mut rng = Pcg32::seed_from_u64(1);
        let registry = PresetRegistry::default();
        let mut e = Entity::dot(1, Vector::new(400.0, 300.0), registry.get(DotPreset::Red).clone());
        let mut frame = ctx(&mut rng);
        frame.pointer = Vector::new(380.0, 300.0);
        e.update(0.1, &mut frame);
        assert!(e.body.vel.x > 0.0);
        assert!(e.body.pos.x > 400.0);
    }

    #[test]
    fn test_flee_dot_with_pointer_on_center_stays_finite() {
        let mut rng = Pcg32::seed_from_u64(1);
        let registry = PresetRegistry::default();
        let mut e = Entity::dot(1, Vector::new(400.0, 300.0), registry.get(DotPreset::Red).clone());
        let mut frame = ctx(&mut rng);
        frame.pointer = Vector::new(400.0, 300.0);
        e.update(0.1, &mut frame);
        assert!(e.body.pos.is_finite());
        assert!(e.body.vel.is_finite());
    }

    #[test]
    fn test_click_marks_once() {
        let registry = PresetRegistry::default();
        let mut e = Entity::dot(1, Vector::new(50.0, 50.0), registry.get(DotPreset::Green).clone());
        assert!(e.is_clicked(Vector::new(60.0, 60.0)));
        assert!(e.click());
        assert!(e.destroyed);
        assert!(!e.is_clicked(Vector::new(60.0, 60.0)));
        assert!(!e.click());
    }

    #[test]
    fn test_text_is_never_clicked_and_renders_live_status() {
        fn render(s: &HudStatus) -> String {
            format!("level: {} clicks: {}", s.level, s.clicks)
        }
        let mut e = Entity::text(1, Vector::new(10.0, 50.0), render, "48px serif", Color::Black);
        assert!(!e.is_clicked(Vector::new(10.0, 50.0)));
        assert!(!e.click());

        let mut surface = RecordingSurface::new(800.0, 600.0);
        surface.clear(800.0, 600.0);
        e.draw(&mut surface, &status());
        assert_eq!(surface.texts(), vec!["level: 3 clicks: 7"]);
    }

    #[test]
    fn test_text_keeps_position_in_tiny_viewport() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = Entity::text(1, Vector::new(10.0, 50.0), |_| String::new(), "48px serif", Color::Black);

        let mut frame = ctx(&mut rng);
        frame.width = 800.0;
        frame.height = 30.0;
        e.update(0.016, &mut frame);
        assert_eq!(e.body.pos, Vector::new(10.0, 50.0));

        e.update(0.016, &mut ctx(&mut rng));
        assert_eq!(e.body.pos, Vector::new(10.0, 50.0));
    }
}
