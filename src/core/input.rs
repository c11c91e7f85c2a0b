//! Pointer input tracking

use winit::event::WindowEvent;

/// Tracks the cursor and reports it normalized to the surface:
/// x in [-1, 1] left to right, y in [-1, 1] bottom to top
pub struct PointerState {
    /// Last cursor position in physical pixels
    cursor: (f32, f32),
    /// Surface size used for normalization
    surface: (f32, f32),
    /// Normalized position
    normalized: (f32, f32),
    /// Whether a cursor event has been seen since the last `take_moved`
    moved: bool,
}

impl PointerState {
    pub fn new(surface_width: f32, surface_height: f32) -> Self {
        Self {
            cursor: (0.0, 0.0),
            surface: (surface_width, surface_height),
            normalized: (0.0, 0.0),
            moved: false,
        }
    }

    /// Process a window event; only cursor movement is of interest
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.cursor_moved(position.x as f32, position.y as f32);
        }
    }

    /// Record a cursor position in physical pixels
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        self.renormalize();
        self.moved = true;
    }

    /// Update the surface size; the normalized position follows the last cursor
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.surface = (width, height);
        self.renormalize();
    }

    fn renormalize(&mut self) {
        let (w, h) = self.surface;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let x = self.cursor.0 / w * 2.0 - 1.0;
        let y = -(self.cursor.1 / h * 2.0 - 1.0);
        self.normalized = (x, y);
    }

    /// Normalized pointer position
    pub fn normalized(&self) -> (f32, f32) {
        self.normalized
    }

    /// Returns true once after each cursor movement
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_corners() {
        let mut pointer = PointerState::new(800.0, 600.0);
        pointer.cursor_moved(0.0, 0.0);
        assert_eq!(pointer.normalized(), (-1.0, 1.0));

        pointer.cursor_moved(800.0, 600.0);
        assert_eq!(pointer.normalized(), (1.0, -1.0));

        pointer.cursor_moved(400.0, 300.0);
        assert_eq!(pointer.normalized(), (0.0, 0.0));
    }

    #[test]
    fn test_take_moved() {
        let mut pointer = PointerState::new(100.0, 100.0);
        assert!(!pointer.take_moved());
        pointer.cursor_moved(10.0, 10.0);
        assert!(pointer.take_moved());
        assert!(!pointer.take_moved());
    }

    #[test]
    fn test_zero_surface_keeps_last_position() {
        let mut pointer = PointerState::new(200.0, 200.0);
        pointer.cursor_moved(150.0, 50.0);
        let before = pointer.normalized();
        pointer.set_surface_size(0.0, 0.0);
        assert_eq!(pointer.normalized(), before);
    }
}
