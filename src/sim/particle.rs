//! Ball kinematics
//!
//! A particle is pure physics state. Rendering reads positions through the
//! simulation's query methods and never holds a particle itself.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::ACCEL_DAMPING;

/// One ball on the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    /// A ball at rest at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    /// A ball at rest somewhere in `[0, 1)` on each axis
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::at(Vec2::new(rng.random::<f32>(), rng.random::<f32>()))
    }

    /// Advance by `dt` seconds under tilt `(ax, ay)`.
    ///
    /// The applied acceleration is the tilt negated and damped, so balls roll
    /// away from the tilt direction.
    pub fn integrate(&mut self, ax: f32, ay: f32, dt: f32) {
        let accel = Vec2::new(-ax, -ay) * ACCEL_DAMPING;

        self.pos += self.vel * dt + accel * dt * dt / 2.0;
        self.vel += accel * dt;
    }

    /// Clamp into `[-bound, +bound]` per axis, stopping motion on any clamped axis
    pub fn resolve_boundary(&mut self, bound_x: f32, bound_y: f32) {
        if self.pos.x > bound_x {
            self.pos.x = bound_x;
            self.vel.x = 0.0;
        } else if self.pos.x < -bound_x {
            self.pos.x = -bound_x;
            self.vel.x = 0.0;
        }

        if self.pos.y > bound_y {
            self.pos.y = bound_y;
            self.vel.y = 0.0;
        } else if self.pos.y < -bound_y {
            self.pos.y = -bound_y;
            self.vel.y = 0.0;
        }
    }
}

/// Half-extents of the playable surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Bounds for a `width` x `height` surface, keeping a whole ball on screen
    pub fn from_surface(width: f32, height: f32, ball_diameter: f32) -> Self {
        Self {
            x: ((width - ball_diameter) * 0.5).max(0.0),
            y: ((height - ball_diameter) * 0.5).max(0.0),
        }
    }
}
