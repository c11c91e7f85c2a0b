//! Core type aliases and re-exports

pub use glam::Vec2;

/// Standard Result type
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Linear RGBA colour, components in 0..=1
pub type Rgba = [f32; 4];

/// Size of the host drawing surface in physical pixels
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
