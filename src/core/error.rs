//! Error types for limbo

use thiserror::Error;

/// Main error type. Geometry generation never fails; these cover the
/// host surface, the GPU and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
