//! Grass blade tessellation.
//!
//! Each blade becomes one closed triangle fan: the base point, then a
//! quadratic Bézier up the left edge to the tip, then a mirrored Bézier back
//! down the right edge. Fans are independent; a backend must never draw the
//! whole buffer as one fan.

use glam::Vec2;

use super::params::GrassBladeParams;

/// Bézier subdivisions per blade edge.
pub const BLADE_SEGMENTS: usize = 16;

/// Vertices per blade fan: base + two edges of `BLADE_SEGMENTS + 1` points.
pub const BLADE_FAN_LEN: usize = 1 + 2 * (BLADE_SEGMENTS + 1);

/// Control points sit this fraction of the blade width beside the base.
const CONTROL_SPREAD: f32 = 0.6;
/// Control points sit this fraction of the blade height above the base.
const CONTROL_RISE: f32 = 0.45;

/// Vertex buffer holding one fan of `BLADE_FAN_LEN` vertices per blade.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrassMesh {
    pub vertices: Vec<Vec2>,
}

impl GrassMesh {
    /// Tessellate `blades` at `time` seconds.
    pub fn build(blades: &[GrassBladeParams], time: f32) -> Self {
        let mut vertices = Vec::with_capacity(blades.len() * BLADE_FAN_LEN);
        build_into(blades, time, &mut vertices);
        Self { vertices }
    }

    pub fn blade_count(&self) -> usize {
        self.vertices.len() / BLADE_FAN_LEN
    }

    /// One slice per blade fan.
    pub fn fans(&self) -> std::slice::ChunksExact<'_, Vec2> {
        self.vertices.chunks_exact(BLADE_FAN_LEN)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Append the fans for `blades` at `time` seconds to `out`.
///
/// Pure function of its inputs: identical blades and time give bit-identical
/// vertices.
pub fn build_into(blades: &[GrassBladeParams], time: f32, out: &mut Vec<Vec2>) {
    out.reserve(blades.len() * BLADE_FAN_LEN);

    for blade in blades {
        let base = Vec2::new(blade.base_x, blade.y_base);
        let tip = Vec2::new(blade.base_x + blade.tip_deflection(time), blade.y_base + blade.height);
        let ctrl_y = blade.y_base + blade.height * CONTROL_RISE;
        let left = Vec2::new(blade.base_x - blade.width * CONTROL_SPREAD, ctrl_y);
        let right = Vec2::new(blade.base_x + blade.width * CONTROL_SPREAD, ctrl_y);

        out.push(base);
        for s in 0..=BLADE_SEGMENTS {
            out.push(quadratic_bezier(base, left, tip, s as f32 / BLADE_SEGMENTS as f32));
        }
        for s in (0..=BLADE_SEGMENTS).rev() {
            out.push(quadratic_bezier(base, right, tip, s as f32 / BLADE_SEGMENTS as f32));
        }
    }
}

/// Point at `t` on the quadratic Bézier `p0 → c → p1`.
pub fn quadratic_bezier(p0: Vec2, c: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t)
}
