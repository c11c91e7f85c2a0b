//! Per-blade grass parameters.

use serde::{Deserialize, Serialize};

/// Sampled parameters for one grass blade, in normalized device coordinates.
///
/// Immutable once sampled; a field is regenerated wholesale on resize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrassBladeParams {
    /// Horizontal position of the blade base.
    pub base_x: f32,
    /// Vertical position of the blade base.
    pub y_base: f32,
    pub height: f32,
    pub width: f32,
    /// Static lean of the tip, before sway.
    pub curve_base: f32,
    /// Phase offset of the sway oscillation (radians).
    pub sway_phase: f32,
}

impl GrassBladeParams {
    /// Horizontal tip deflection at `time` seconds: static lean plus sway.
    pub fn tip_deflection(&self, time: f32) -> f32 {
        let sway = (time * 0.35 + self.sway_phase + self.base_x * 2.5).sin() * 0.035;
        self.curve_base + sway
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_deflection_bounded_by_sway() {
        let blade = GrassBladeParams {
            base_x: 0.2,
            y_base: -0.9,
            height: 0.1,
            width: 0.02,
            curve_base: 0.05,
            sway_phase: 1.0,
        };
        for i in 0..100 {
            let d = blade.tip_deflection(i as f32 * 0.37);
            assert!((d - blade.curve_base).abs() <= 0.035 + 1e-6);
        }
    }
}
