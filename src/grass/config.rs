//! Grass layer configuration.
//!
//! The three presets reproduce the near, mid and far rows of the scene.

use serde::{Deserialize, Serialize};

use crate::core::Rgba;

/// NDC height of the ground bar top edge above the bottom of the surface.
pub const GROUND_BAR_HEIGHT: f32 = 0.10;

/// Blade bases sit slightly below the top of the ground bar.
pub const GRASS_Y_BASE: f32 = -1.0 + GROUND_BAR_HEIGHT - 0.025;

/// Configuration for one grass row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassLayerConfig {
    /// Requested blade count. Accepted for symmetry with tree rows; the field
    /// width alone decides how many blades are sampled.
    pub count: u32,
    /// Blade base height in NDC.
    pub y_base: f32,
    pub height_scale: f32,
    pub width_scale: f32,
    pub curve_scale: f32,
    /// Added to every blade's sway phase so rows do not sway in lockstep.
    pub phase_offset: f32,
    pub color: Rgba,
    /// NDC offset per unit of pointer x. Zero disables parallax.
    pub parallax_strength: f32,
    /// How many times the row is drawn each frame.
    pub passes: u32,
}

impl GrassLayerConfig {
    /// Nearest row: dark, tall, drawn twice for density.
    pub fn near() -> Self {
        Self {
            count: 160,
            y_base: GRASS_Y_BASE,
            height_scale: 0.5,
            width_scale: 0.5,
            curve_scale: 1.0,
            phase_offset: 0.0,
            color: [0.0, 0.0, 0.0, 1.0],
            parallax_strength: 0.01,
            passes: 2,
        }
    }

    pub fn mid() -> Self {
        Self {
            count: 120,
            y_base: GRASS_Y_BASE,
            height_scale: 0.4,
            width_scale: 0.55,
            curve_scale: 0.8,
            phase_offset: 1.5,
            color: [0.08, 0.08, 0.10, 1.0],
            parallax_strength: 0.005,
            passes: 1,
        }
    }

    pub fn far() -> Self {
        Self {
            count: 80,
            y_base: GRASS_Y_BASE,
            height_scale: 0.325,
            width_scale: 0.6,
            curve_scale: 0.6,
            phase_offset: 3.0,
            color: [0.12, 0.12, 0.15, 1.0],
            parallax_strength: 0.002,
            passes: 1,
        }
    }
}

impl Default for GrassLayerConfig {
    fn default() -> Self {
        Self::near()
    }
}
