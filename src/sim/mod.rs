//! Seeded simulation module
//!
//! All gameplay logic lives here. This module stays free of platform code:
//! - Time only advances through `Stage::tick`/`Stage::step`
//! - Seeded RNG only
//! - Stable iteration order (entity insertion order)
//! - Drawing goes through the `Surface` trait

pub mod behavior;
pub mod body;
pub mod entity;
pub mod stage;
pub mod tick;
pub mod vector;

pub use behavior::{DotConfig, DotPreset, PresetRegistry, PresetTable, Pulse, Relocate, flee, wander};
pub use body::{Body, BoundaryPolicy};
pub use entity::{Dot, Entity, EntityKind, FrameContext, HudText, TextFn};
pub use stage::{HudStatus, Outcome, Stage, outcome_text, status_text};
pub use vector::{Matrix, Vector};
