//! Canvas 2D surface for the browser host

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};
use crate::sim::Vector;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas element, acquiring its 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (self.canvas.width() as f32, self.canvas.height() as f32);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        // Assigning the same size still resets the context, so skip no-ops
        if self.canvas.width() != width as u32 {
            self.canvas.set_width(width as u32);
        }
        if self.canvas.height() != height as u32 {
            self.canvas.set_height(height as u32);
        }
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vector, radius: f32, color: Color) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, position: Vector, font: &str, color: Color) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color.as_css());
        if let Err(e) = self.ctx.fill_text(text, position.x as f64, position.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
