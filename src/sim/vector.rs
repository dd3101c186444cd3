//! Immutable 2D vector and 2x2 matrix value types
//!
//! Thin wrappers over `glam` that keep the arcade's vocabulary
//! (`add`, `sub`, `multiply`, `xform`, `normal`). Every operation returns a
//! new value; nothing is mutated in place.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// A 2D vector (position, velocity or acceleration)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `self + v`
    #[inline]
    pub fn add(self, v: Vector) -> Vector {
        (Vec2::from(self) + Vec2::from(v)).into()
    }

    /// `self - v` (argument order matters)
    #[inline]
    pub fn sub(self, v: Vector) -> Vector {
        (Vec2::from(self) - Vec2::from(v)).into()
    }

    #[inline]
    pub fn multiply(self, a: f32) -> Vector {
        (Vec2::from(self) * a).into()
    }

    /// Apply a 2x2 linear transform
    #[inline]
    pub fn xform(self, m: Matrix) -> Vector {
        (m.0 * Vec2::from(self)).into()
    }

    /// Direction in radians, `atan2(y, x)`
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn length(self) -> f32 {
        Vec2::from(self).length()
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        Vec2::from(self).length_squared()
    }

    /// Unit vector in this direction.
    ///
    /// NaN for the zero vector; use [`Vector::normal_or`] where that can happen.
    #[inline]
    pub fn normal(self) -> Vector {
        self.multiply(1.0 / self.length())
    }

    /// Unit vector in this direction, or `fallback` when the length is zero
    pub fn normal_or(self, fallback: Vector) -> Vector {
        let len = self.length();
        if len > f32::EPSILON && len.is_finite() {
            self.multiply(1.0 / len)
        } else {
            fallback
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// Immutable 2x2 transform, rows `(x1, y1)` and `(x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(Mat2);

impl Matrix {
    /// Build from row-major entries: `x' = x1*x + y1*y`, `y' = x2*x + y2*y`
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        // glam is column-major
        Self(Mat2::from_cols_array(&[x1, x2, y1, y2]))
    }

    /// Counter-clockwise rotation by `angle` radians
    pub fn rot(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    pub fn x1(&self) -> f32 {
        self.0.x_axis.x
    }

    pub fn y1(&self) -> f32 {
        self.0.y_axis.x
    }

    pub fn x2(&self) -> f32 {
        self.0.x_axis.y
    }

    pub fn y2(&self) -> f32 {
        self.0.y_axis.y
    }
}
