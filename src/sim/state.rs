//! Simulation state and configuration
//!
//! Everything one herding session needs lives here. Sessions are never reset
//! in place: a new session is a new `SimState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::{Bounds, Particle};
use super::target::TargetRegion;
use super::viewport::Viewport;
use crate::consts::*;

/// Construction-time parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Balls at session start
    pub particle_count: usize,
    /// Ball diameter, also the collision distance
    pub ball_diameter: f32,
    /// Initial hole radius (pixels)
    pub target_radius: f32,
    /// Radius added per grow action (pixels)
    pub target_growth: f32,
    /// Playable surface size (scene units)
    pub surface_width: f32,
    pub surface_height: f32,
    /// Screen pixels per scene unit
    pub pixels_per_unit: f32,
    /// Seed for initial placement and collision jitter
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            ball_diameter: BALL_DIAMETER,
            target_radius: TARGET_RADIUS,
            target_growth: TARGET_GROWTH,
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            pixels_per_unit: SCREEN_DPI / METERS_PER_INCH,
            seed: 0x5EED,
        }
    }
}

impl SimConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_surface(self.surface_width, self.surface_height, self.ball_diameter)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::for_surface(
            self.surface_width,
            self.surface_height,
            self.ball_diameter,
            self.pixels_per_unit,
        )
    }

    /// Initial hole, centered on the screen
    pub fn target(&self) -> TargetRegion {
        TargetRegion {
            center: self.viewport().screen_center(),
            radius: self.target_radius,
            growth: self.target_growth,
        }
    }
}

/// State of one herding session
#[derive(Debug, Clone)]
pub struct SimState {
    /// Balls still in play, in collision/scoring order
    pub(crate) particles: Vec<Particle>,
    /// Balls at session start
    initial_count: usize,
    /// Balls scored so far
    pub(crate) score: u32,
    /// Timestamp (ms) of the previous update, `None` before the first
    pub(crate) last_timestamp: Option<u64>,
    /// Scoring hole in screen pixels (moved/resized from outside)
    pub target: TargetRegion,
    /// Scene-to-screen mapping used for the hole test
    pub viewport: Viewport,
    /// Playable half-extents
    pub bounds: Bounds,
    /// Collision distance
    pub ball_diameter: f32,
    /// Jitter source
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Start a session with `particle_count` balls scattered in `[0, 1)`
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut rng))
            .collect();

        Self::from_parts(config, particles, rng)
    }

    /// Start a session with explicitly placed balls
    pub fn with_particles(config: &SimConfig, particles: Vec<Particle>) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::from_parts(config, particles, rng)
    }

    fn from_parts(config: &SimConfig, particles: Vec<Particle>, rng: Pcg32) -> Self {
        Self {
            initial_count: particles.len(),
            particles,
            score: 0,
            last_timestamp: None,
            target: config.target(),
            viewport: config.viewport(),
            bounds: config.bounds(),
            ball_diameter: config.ball_diameter,
            rng,
        }
    }

    /// Balls scored so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Balls still in play
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// All balls are in the hole
    pub fn is_cleared(&self) -> bool {
        self.particles.is_empty()
    }

    /// Active balls, in processing order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Position of the `i`-th active ball
    pub fn position(&self, i: usize) -> Option<Vec2> {
        self.particles.get(i).map(|p| p.pos)
    }

    /// Screen position of the `i`-th active ball
    pub fn screen_position(&self, i: usize) -> Option<Vec2> {
        self.position(i).map(|p| self.viewport.to_screen(p))
    }

    /// Positions of all active balls
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.pos)
    }

    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }
}
