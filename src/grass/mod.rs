//! Procedural grass.
//!
//! A grass layer owns a sampled field of blade parameters and rebuilds its
//! fan mesh every frame, because sway depends on continuous time.

pub mod config;
pub mod mesh;
pub mod params;
pub mod sampler;

pub use config::{GrassLayerConfig, GRASS_Y_BASE, GROUND_BAR_HEIGHT};
pub use mesh::{GrassMesh, BLADE_FAN_LEN, BLADE_SEGMENTS};
pub use params::GrassBladeParams;
pub use sampler::sample_grass_field;
