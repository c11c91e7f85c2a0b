//! Pointer-driven parallax.
//!
//! Each layer shifts horizontally in proportion to the pointer's x position
//! and its own strength, so nearer layers move further than distant ones.
//! Offsets apply instantly; there is no easing.

use glam::Vec2;

/// Current pointer position, normalized to [-1, 1] on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxController {
    pointer: Vec2,
}

impl ParallaxController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the normalized pointer position. Values are clamped to [-1, 1].
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pixel offset for a tree row: `pointer_x * canvas_width * strength`.
    pub fn tree_offset(&self, strength: f32, canvas_width: f32) -> f32 {
        self.pointer.x * canvas_width * strength
    }

    /// NDC offset for a grass row; zero strength disables the shift.
    pub fn grass_offset(&self, strength: f32) -> f32 {
        if strength > 0.0 {
            self.pointer.x * strength
        } else {
            0.0
        }
    }
}

/// Copy `base` into `out` shifted horizontally by `dx`.
pub fn translate_x(base: &[Vec2], dx: f32, out: &mut Vec<Vec2>) {
    out.clear();
    out.extend(base.iter().map(|v| Vec2::new(v.x + dx, v.y)));
}
