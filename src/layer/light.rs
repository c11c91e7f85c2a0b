//! Flickering ambient light glow.
//!
//! A soft radial glow near the top-right corner whose radius breathes slowly
//! and whose brightness flickers like a failing lamp.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// GPU uniform for the light pass. Must match `LightUniforms` in light.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniforms {
    /// Seconds
    pub time: f32,
    /// 0..=1
    pub flicker: f32,
    pub radius_base: f32,
    pub radius_wobble: f32,
    // -- 16 bytes --
    /// Glow centre in uv (0..1, y up)
    pub center: [f32; 2],
    pub edge: f32,
    pub strength: f32,
    // -- 16 bytes --
    pub color: [f32; 4],
    // -- 16 bytes --
    // Total: 48 bytes
}

/// Light glow settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerLight {
    pub center: [f32; 2],
    pub radius_base: f32,
    pub radius_wobble: f32,
    /// Width of the soft falloff band
    pub edge: f32,
    /// Peak alpha
    pub strength: f32,
    pub color: [f32; 3],
}

impl Default for FlickerLight {
    fn default() -> Self {
        Self {
            center: [0.92, 0.92],
            radius_base: 0.68,
            radius_wobble: 0.10,
            edge: 0.36,
            strength: 0.18,
            color: [1.0, 0.98, 0.85],
        }
    }
}

impl FlickerLight {
    /// Uniforms for the frame at `time_ms` milliseconds.
    pub fn uniforms(&self, time_ms: f64) -> LightUniforms {
        LightUniforms {
            time: (time_ms * 0.001) as f32,
            flicker: flicker_at(time_ms),
            radius_base: self.radius_base,
            radius_wobble: self.radius_wobble,
            center: self.center,
            edge: self.edge,
            strength: self.strength,
            color: [self.color[0], self.color[1], self.color[2], 1.0],
        }
    }
}

/// Flicker level at `time_ms`: a slow swell modulated by a fast jitter,
/// clamped to 0..=1.
pub fn flicker_at(time_ms: f64) -> f32 {
    let t = time_ms;
    let slow = (t * 0.001 + (t * 0.003).sin()).sin();
    let fast = (t * 0.135 + (t * 0.27).sin()).sin();
    let flicker = slow.abs() * 0.7 + 0.3 * fast * slow.abs();
    flicker.clamp(0.0, 1.0) as f32
}

/// CPU mirror of the fragment shader's alpha at `uv`, used to check the
/// falloff shape.
pub fn glow_alpha(uniforms: &LightUniforms, uv: [f32; 2]) -> f32 {
    let dx = uv[0] - uniforms.center[0];
    let dy = uv[1] - uniforms.center[1];
    let dist = (dx * dx + dy * dy).sqrt();
    let radius = uniforms.radius_base + uniforms.radius_wobble * (uniforms.time * 0.7).sin();
    let intensity = 1.0 - smoothstep(radius - uniforms.edge, radius, dist);
    intensity * (0.7 + 0.3 * uniforms.flicker) * uniforms.strength
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
