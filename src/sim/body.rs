//! Movable body: Euler integration plus the stage boundary policy

use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::bound;

/// What happens when a body leaves the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Keep the whole circle on-screen: each axis in `[radius, size - radius]`
    #[default]
    Clamp,
    /// Re-enter from the opposite edge (floored modulo of the stage size)
    Wrap,
}

impl BoundaryPolicy {
    /// Apply the policy to a position for a body of the given radius
    pub fn apply(self, pos: Vector, radius: f32, width: f32, height: f32) -> Vector {
        match self {
            BoundaryPolicy::Clamp => Vector::new(
                bound(pos.x, radius, width - radius),
                bound(pos.y, radius, height - radius),
            ),
            BoundaryPolicy::Wrap => Vector::new(wrap(pos.x, width), wrap(pos.y, height)),
        }
    }
}

/// Floored modulo; a zero-sized axis leaves the coordinate alone
#[inline]
fn wrap(value: f32, size: f32) -> f32 {
    if size > 0.0 { value.rem_euclid(size) } else { value }
}

/// Kinematic state shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vector,
    pub vel: Vector,
    pub accel: Vector,
    /// Hit-test and render radius
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vector, radius: f32) -> Self {
        Self {
            pos,
            vel: Vector::ZERO,
            accel: Vector::ZERO,
            radius,
        }
    }

    /// Forward Euler step followed by the boundary policy
    pub fn integrate(&mut self, dt: f32, policy: BoundaryPolicy, width: f32, height: f32) {
        self.pos = self.pos.add(self.vel.multiply(dt));
        self.vel = self.vel.add(self.accel.multiply(dt));
        self.pos = policy.apply(self.pos, self.radius, width, height);
    }

    /// Strict circle test against the current position and radius
    pub fn contains(&self, point: Vector) -> bool {
        self.pos.sub(point).length_squared() < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate_position_uses_old_velocity() {
        let mut body = Body::new(Vector::new(100.0, 100.0), 10.0);
        body.vel = Vector::new(10.0, 0.0);
        body.accel = Vector::new(0.0, 20.0);
        body.integrate(0.5, BoundaryPolicy::Clamp, 1000.0, 1000.0);
        assert_eq!(body.pos, Vector::new(105.0, 100.0));
        assert_eq!(body.vel, Vector::new(10.0, 10.0));
    }

    #[test]
    fn test_clamp_keeps_circle_on_screen() {
        let mut body = Body::new(Vector::new(790.0, 20.0), 30.0);
        body.vel = Vector::new(500.0, -500.0);
        body.integrate(1.0, BoundaryPolicy::Clamp, 800.0, 600.0);
        assert_eq!(body.pos, Vector::new(770.0, 30.0));
    }

    #[test]
    fn test_wrap_handles_negative_positions() {
        let mut body = Body::new(Vector::new(10.0, 590.0), 5.0);
        body.vel = Vector::new(-30.0, 30.0);
        body.integrate(1.0, BoundaryPolicy::Wrap, 800.0, 600.0);
        assert_eq!(body.pos, Vector::new(780.0, 20.0));
    }

    #[test]
    fn test_wrap_on_zero_sized_stage_stays_finite() {
        let pos = BoundaryPolicy::Wrap.apply(Vector::new(3.0, 4.0), 1.0, 0.0, 0.0);
        assert_eq!(pos, Vector::new(3.0, 4.0));
    }

    #[test]
    fn test_contains_is_strict() {
        let body = Body::new(Vector::new(0.0, 0.0), 10.0);
        assert!(body.contains(Vector::new(6.0, 7.9)));
        assert!(!body.contains(Vector::new(10.0, 0.0)));
        assert!(!body.contains(Vector::new(8.0, 8.0)));
    }

    proptest! {
        #[test]
        fn clamp_never_retains_overshoot(
            x in 0.0f32..800.0, y in 0.0f32..600.0,
            vx in -5000.0f32..5000.0, vy in -5000.0f32..5000.0,
            dt in 0.0f32..1.0, radius in 1.0f32..100.0,
        ) {
            let mut body = Body::new(Vector::new(x, y), radius);
            body.vel = Vector::new(vx, vy);
            body.integrate(dt, BoundaryPolicy::Clamp, 800.0, 600.0);
            prop_assert!(body.pos.x >= radius && body.pos.x <= 800.0 - radius);
            prop_assert!(body.pos.y >= radius && body.pos.y <= 600.0 - radius);
        }

        #[test]
        fn wrap_lands_inside_stage(
            x in -5000.0f32..5000.0, y in -5000.0f32..5000.0,
        ) {
            let pos = BoundaryPolicy::Wrap.apply(Vector::new(x, y), 1.0, 800.0, 600.0);
            prop_assert!(pos.x >= 0.0 && pos.x <= 800.0);
            prop_assert!(pos.y >= 0.0 && pos.y <= 600.0);
        }
    }
}
