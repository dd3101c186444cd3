//! Surface that records draw calls instead of rasterizing them

use super::{Color, Surface};
use crate::sim::Vector;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vector, radius: f32, color: Color },
    Text { text: String, position: Vector, font: String, color: Color },
}

/// Headless surface with a fixed (but changeable) viewport
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub viewport: (f32, f32),
    pub size: (f32, f32),
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: (width, height),
            size: (width, height),
            commands: Vec::new(),
        }
    }

    /// Commands issued since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Texts drawn in the most recent frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Circles drawn in the most recent frame
    pub fn circles(&self) -> Vec<(Vector, f32, Color)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    /// Drop history so long sessions do not grow without bound
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vector, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_text(&mut self, text: &str, position: Vector, font: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font: font.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_frame_starts_at_latest_clear() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.clear(100.0, 100.0);
        surface.fill_text("old", Vector::ZERO, "48px serif", Color::Black);
        surface.clear(100.0, 100.0);
        surface.fill_circle(Vector::new(1.0, 2.0), 3.0, Color::Red);
        surface.fill_text("new", Vector::ZERO, "48px serif", Color::Black);

        assert_eq!(surface.texts(), vec!["new"]);
        assert_eq!(surface.circles(), vec![(Vector::new(1.0, 2.0), 3.0, Color::Red)]);
    }

    #[test]
    fn test_color_css_names() {
        assert_eq!(Color::White.as_css(), "white");
        assert_eq!(Color::Green.as_css(), "green");
    }
}
