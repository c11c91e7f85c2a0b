//! Limbo - procedural parallax silhouette forest background

pub mod core;
pub mod grass;
pub mod layer;
pub mod parallax;
pub mod render;
pub mod scene;
pub mod tree;
