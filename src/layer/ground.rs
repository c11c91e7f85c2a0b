//! Opaque ground bar along the bottom of the surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::Rgba;
use crate::grass::GROUND_BAR_HEIGHT;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundBar {
    /// Height in NDC units above the bottom edge
    pub height: f32,
    pub color: Rgba,
}

impl Default for GroundBar {
    fn default() -> Self {
        Self {
            height: GROUND_BAR_HEIGHT,
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl GroundBar {
    /// Full-width quad as a triangle strip, NDC
    pub fn vertices(&self) -> [Vec2; 4] {
        let y0 = -1.0;
        let y1 = -1.0 + self.height;
        [
            Vec2::new(-1.0, y0),
            Vec2::new(1.0, y0),
            Vec2::new(-1.0, y1),
            Vec2::new(1.0, y1),
        ]
    }

    /// Pixel row of the bar's top edge on a surface `canvas_height` tall
    pub fn top_px(&self, canvas_height: f32) -> f32 {
        canvas_height * (1.0 - self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_quad() {
        let bar = GroundBar::default();
        let v = bar.vertices();
        assert_eq!(v[0], Vec2::new(-1.0, -1.0));
        assert!((v[3].y - (-0.9)).abs() < 1e-6);
    }

    #[test]
    fn test_top_px_scales_with_height() {
        let bar = GroundBar::default();
        assert!((bar.top_px(600.0) - 570.0).abs() < 1e-3);
        assert!((bar.top_px(800.0) - 760.0).abs() < 1e-3);
    }
}
