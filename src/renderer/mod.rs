//! Drawing-surface contract
//!
//! The simulation only ever draws filled circles and text. Hosts supply a
//! [`Surface`]: the browser wraps a 2D canvas context, tests and the native
//! host record commands instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use serde::{Deserialize, Serialize};

use crate::sim::Vector;

/// Fill colors used by dots and HUD text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Blue,
    #[default]
    Black,
    White,
}

impl Color {
    /// CSS color name for `fillStyle`
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

/// A resizable rectangular drawing target
pub trait Surface {
    /// Current size of the host viewport
    fn viewport(&self) -> (f32, f32);

    /// Resize the backing canvas
    fn resize(&mut self, width: f32, height: f32);

    /// Clear the rectangle `(0, 0, width, height)`
    fn clear(&mut self, width: f32, height: f32);

    fn fill_circle(&mut self, center: Vector, radius: f32, color: Color);

    fn fill_text(&mut self, text: &str, position: Vector, font: &str, color: Color);
}
