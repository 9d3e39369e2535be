//! Scene-to-screen mapping
//!
//! Balls move in scene units with the origin at the middle of the surface and
//! y pointing up. The hole lives in screen pixels with y pointing down, so the
//! hole test runs on the ball's screen position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed scale + offset from scene units to screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the scene origin
    pub origin: Vec2,
    /// Pixels per scene unit
    pub scale: f32,
    /// Screen size in pixels
    pub size: Vec2,
}

impl Viewport {
    /// Viewport for a `width` x `height` surface drawn at `pixels_per_unit`.
    ///
    /// The ball sprite is `ball_diameter` wide, rounded to whole pixels, and
    /// the origin is offset by half of it from the screen center.
    pub fn for_surface(width: f32, height: f32, ball_diameter: f32, pixels_per_unit: f32) -> Self {
        let size = Vec2::new(width, height) * pixels_per_unit;
        let sprite = (ball_diameter * pixels_per_unit + 0.5).floor();

        Self {
            origin: (size - Vec2::splat(sprite)) * 0.5,
            scale: pixels_per_unit,
            size,
        }
    }

    /// Screen position of a scene point (y flipped)
    #[inline]
    pub fn to_screen(&self, pos: Vec2) -> Vec2 {
        Vec2::new(self.origin.x + pos.x * self.scale, self.origin.y - pos.y * self.scale)
    }

    pub fn screen_center(&self) -> Vec2 {
        self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_unit_scale() {
        let vp = Viewport::for_surface(100.0, 100.0, 0.0025, 1.0);
        assert_eq!(vp.origin, Vec2::new(50.0, 50.0));
        assert_eq!(vp.screen_center(), Vec2::new(50.0, 50.0));
        assert_eq!(vp.to_screen(Vec2::new(3.0, 4.0)), Vec2::new(53.0, 46.0));
    }

    #[test]
    fn test_reference_phone() {
        let ppm = SCREEN_DPI / METERS_PER_INCH;
        let vp = Viewport::for_surface(SURFACE_WIDTH, SURFACE_HEIGHT, BALL_DIAMETER, ppm);

        // 0.0025 m at 420 dpi is 41.34 px, drawn 41 px wide
        let sprite = (BALL_DIAMETER * ppm + 0.5).floor();
        assert_eq!(sprite, 41.0);
        assert!((vp.origin.x - (SURFACE_WIDTH * ppm - 41.0) * 0.5).abs() < 1e-2);
        assert!((vp.origin.y - (SURFACE_HEIGHT * ppm - 41.0) * 0.5).abs() < 1e-2);

        // Scene origin sits half a sprite up-left of the screen center
        let offset = vp.screen_center() - vp.to_screen(Vec2::ZERO);
        assert!((offset.x - 20.5).abs() < 1e-2);
        assert!((offset.y - 20.5).abs() < 1e-2);
    }

    #[test]
    fn test_y_axis_flips() {
        let vp = Viewport::for_surface(0.06, 0.1, 0.0025, 1000.0);
        let up = vp.to_screen(Vec2::new(0.0, 0.01));
        let down = vp.to_screen(Vec2::new(0.0, -0.01));
        assert!(up.y < vp.origin.y);
        assert!(down.y > vp.origin.y);
        assert!((down.y - up.y - 20.0).abs() < 1e-3);
    }
}
