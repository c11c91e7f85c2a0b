//! Scene configuration and runtime state

pub mod config;
pub mod state;

pub use config::SceneConfig;
pub use state::SceneState;
