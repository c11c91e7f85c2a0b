//! Window creation using winit

use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use crate::core::error::Error;

/// Window configuration
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Limbo".to_string(),
            width: 960,
            height: 540,
        }
    }
}

impl WindowConfig {
    pub fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
    }

    /// Create the window on a running event loop
    pub fn create(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, Error> {
        event_loop
            .create_window(self.attributes())
            .map(Arc::new)
            .map_err(|e| Error::Window(format!("Failed to create window: {}", e)))
    }
}
