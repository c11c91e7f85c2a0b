//! Render pipelines

pub mod flat;
pub mod light;

pub use flat::{FlatPipeline, FlatVertex};
pub use light::LightPipeline;
