//! Particle simulation module
//!
//! Balls move in scene units (meters on the reference device); the hole is
//! placed and sized in screen pixels through a [`Viewport`].
//!
//! All herding logic lives here. This module stays free of rendering and
//! transport concerns:
//! - Elapsed time comes only from the caller's timestamps
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the balls)

pub mod collision;
pub mod engine;
pub mod event;
pub mod particle;
pub mod state;
pub mod target;
pub mod tick;
pub mod viewport;

pub use collision::{CollisionReport, resolve_collisions};
pub use engine::Simulation;
pub use event::{ScoreEvent, ScoreSink};
pub use particle::{Bounds, Particle};
pub use state::{SimConfig, SimState};
pub use target::TargetRegion;
pub use tick::{FrameReport, update};
pub use viewport::Viewport;
