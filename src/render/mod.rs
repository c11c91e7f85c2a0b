//! Rendering system and GPU interfaces

pub mod backend;
pub mod context;
pub mod pipeline;
pub mod window;

pub use backend::{FrameGeometry, WgpuBackend};
pub use context::GpuContext;
pub use window::WindowConfig;
