//! Tilt Herd - herd tilting balls into a hole, steered over MQTT
//!
//! Core modules:
//! - `sim`: Particle simulation (integration, collisions, scoring)
//! - `messaging`: Acceleration sample codec, shared sample slot, gateway seam
//! - `controller`: Pointer-to-tilt mapping used by the remote controller
//! - `settings`: Broker and simulation configuration

pub mod controller;
pub mod error;
pub mod messaging;
pub mod settings;
pub mod sim;

pub use error::{DecodeError, GatewayError, SettingsError};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Number of balls at the start of a session
    pub const PARTICLE_COUNT: usize = 15;
    /// Ball diameter in scene units (meters on the reference device)
    pub const BALL_DIAMETER: f32 = 0.0025;

    /// Incoming tilt is negated and scaled by this before integration
    pub const ACCEL_DAMPING: f32 = 1.0 / 5.0;

    /// Collision resolution stops after this many passes
    pub const MAX_COLLISION_ITERATIONS: u32 = 10;
    /// Per-axis jitter span added to overlapping separations
    pub const COLLISION_JITTER: f32 = 0.0001;

    /// Target hole defaults (screen pixels)
    pub const TARGET_RADIUS: f32 = 80.0;
    pub const TARGET_GROWTH: f32 = 10.0;

    /// Reference playable surface (a phone screen, in meters)
    pub const SURFACE_WIDTH: f32 = 0.0635;
    pub const SURFACE_HEIGHT: f32 = 0.127;

    /// Reference screen density, dots per inch
    pub const SCREEN_DPI: f32 = 420.0;
    pub const METERS_PER_INCH: f32 = 0.0254;

    /// Controller tilt range is +/- this value at the canvas edges
    pub const CONTROLLER_MAX_ACCEL: f32 = 4.905;
}
