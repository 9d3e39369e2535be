//! The target hole balls are herded into

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Circular scoring region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRegion {
    pub center: Vec2,
    pub radius: f32,
    /// Radius added by each `grow()`
    #[serde(default = "default_growth")]
    pub growth: f32,
}

fn default_growth() -> f32 {
    crate::consts::TARGET_GROWTH
}

impl TargetRegion {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            growth: default_growth(),
        }
    }

    /// Strictly inside (a point exactly on the rim does not count)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() < self.radius * self.radius
    }

    /// Widen the hole by one growth step
    pub fn grow(&mut self) {
        self.radius += self.growth;
    }

    /// Move the hole to `pointer`, but only when the pointer grabbed it.
    ///
    /// Returns true if the region moved.
    pub fn drag_to(&mut self, pointer: Vec2) -> bool {
        if self.contains(pointer) {
            self.center = pointer;
            true
        } else {
            false
        }
    }
}

impl Default for TargetRegion {
    fn default() -> Self {
        Self::new(Vec2::ZERO, crate::consts::TARGET_RADIUS)
    }
}
