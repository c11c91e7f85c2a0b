//! Core types and utilities shared by the scene

pub mod types;
pub mod error;
pub mod logging;
pub mod time;
pub mod input;
pub mod rng;

pub use types::*;
pub use error::Error;
