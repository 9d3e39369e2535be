//! Remote tilt controller
//!
//! Stands in for a phone's accelerometer: a pointer on a square canvas is
//! turned into a tilt sample. The canvas center is level; the edges tilt by
//! `CONTROLLER_MAX_ACCEL` (half of standard gravity).

use crate::consts::CONTROLLER_MAX_ACCEL;
use crate::messaging::AccelSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerController {
    /// Canvas edge length in pixels
    pub canvas_size: f32,
}

impl PointerController {
    pub fn new(canvas_size: f32) -> Self {
        Self { canvas_size }
    }

    /// Tilt for a pointer at pixel `(px, py)`.
    ///
    /// Screen x grows to the right but tilt x is negated; screen y already
    /// grows downward.
    pub fn sample_at(&self, px: f32, py: f32) -> AccelSample {
        let center = self.canvas_size / 2.0;
        if center <= 0.0 {
            return AccelSample::ZERO;
        }
        let mult = CONTROLLER_MAX_ACCEL / center;

        AccelSample::new((px - center) * -mult, (py - center) * mult)
    }

    /// Wire payload for a pointer at `(px, py)`
    pub fn payload_at(&self, px: f32, py: f32) -> String {
        self.sample_at(px, py).encode()
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(600.0)
    }
}
