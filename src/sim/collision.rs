//! Ball-to-ball overlap resolution
//!
//! Overlapping balls are pushed apart by an infinitely stiff virtual spring:
//! positions are corrected directly, velocities are left alone. Each pass
//! tests every pair, then clamps every ball back onto the surface.

use glam::Vec2;
use rand::Rng;

use super::particle::{Bounds, Particle};
use crate::consts::{COLLISION_JITTER, MAX_COLLISION_ITERATIONS};

/// Outcome of one collision-resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Passes executed (never more than `MAX_COLLISION_ITERATIONS`)
    pub iterations: u32,
    /// Overlapping pairs found across all passes
    pub contacts: u32,
    /// The last pass found no overlap
    pub settled: bool,
}

/// Separate overlapping balls and clamp them to `bounds`.
///
/// Stops after the first pass with no overlap.
pub fn resolve_collisions<R: Rng + ?Sized>(
    particles: &mut [Particle],
    ball_diameter: f32,
    bounds: Bounds,
    rng: &mut R,
) -> CollisionReport {
    let threshold = ball_diameter * ball_diameter;
    let mut report = CollisionReport::default();

    let mut more = true;
    while more && report.iterations < MAX_COLLISION_ITERATIONS {
        more = false;
        report.iterations += 1;

        let count = particles.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let delta = particles[j].pos - particles[i].pos;
                if delta.length_squared() > threshold {
                    continue;
                }

                more = true;
                report.contacts += 1;

                if let Some(effect) = spring_correction(delta, ball_diameter, rng) {
                    particles[i].pos -= effect;
                    particles[j].pos += effect;
                }
            }
        }

        for particle in particles.iter_mut() {
            particle.resolve_boundary(bounds.x, bounds.y);
        }
    }

    report.settled = !more;
    report
}

/// Half of the overlap correction along a jittered separation.
///
/// Returns `None` when the jittered separation is exactly zero; the pair is
/// left for the next pass.
fn spring_correction<R: Rng + ?Sized>(delta: Vec2, ball_diameter: f32, rng: &mut R) -> Option<Vec2> {
    let jitter = Vec2::new(
        (rng.random::<f32>() - 0.5) * COLLISION_JITTER,
        (rng.random::<f32>() - 0.5) * COLLISION_JITTER,
    );
    let delta = delta + jitter;

    let dd = delta.length_squared();
    if dd == 0.0 {
        return None;
    }

    let d = dd.sqrt();
    let c = 0.5 * (ball_diameter - d) / d;
    Some(delta * c)
}
