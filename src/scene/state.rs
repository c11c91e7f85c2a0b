//! Scene state: the single owner of everything that changes at runtime.

use crate::core::rng::{self, SceneRng};
use crate::core::CanvasSize;
use crate::layer::{
    default_layers, DrawBackend, FrameContext, Layer, LayerCompositor, LayerId, RegenContext,
};
use crate::parallax::ParallaxController;

use super::config::SceneConfig;

/// Canvas size, pointer, random source and the composed layer stack.
pub struct SceneState {
    config: SceneConfig,
    canvas: CanvasSize,
    parallax: ParallaxController,
    rng: SceneRng,
    compositor: LayerCompositor,
}

impl SceneState {
    /// Build the layer stack from `config` and generate every layer.
    pub fn new(config: SceneConfig, canvas: CanvasSize, rng: SceneRng) -> Self {
        let layers = default_layers(
            config.light.clone(),
            config.trees.clone(),
            config.grass.clone(),
            config.ground.clone(),
        );
        let compositor = LayerCompositor::with_layers(config.clear_color, layers);

        let mut state = Self {
            config,
            canvas,
            parallax: ParallaxController::new(),
            rng,
            compositor,
        };
        state.regenerate();
        state
    }

    /// Build a scene seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: SceneConfig, canvas: CanvasSize) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Using scene seed {}", seed);
                rng::seeded(seed)
            }
            None => rng::from_entropy(),
        };
        Self::new(config, canvas, rng)
    }

    /// Resample and regrow everything for a new surface size, including a
    /// resize to the current size. Zero-sized surfaces (minimized windows)
    /// are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        let canvas = CanvasSize::new(width, height);
        if canvas.is_empty() {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        log::info!(
            "Resizing scene {}x{} -> {}x{}",
            self.canvas.width,
            self.canvas.height,
            width,
            height
        );
        self.canvas = canvas;
        self.regenerate();
    }

    /// Set the normalized pointer position, x and y in [-1, 1].
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.parallax.set_pointer(x, y);
    }

    /// Set the pointer from a position in surface pixels.
    pub fn pointer_moved(&mut self, px: f32, py: f32) {
        if self.canvas.is_empty() {
            return;
        }
        let x = px / self.canvas.width * 2.0 - 1.0;
        let y = -(py / self.canvas.height * 2.0 - 1.0);
        self.set_pointer(x, y);
    }

    /// Compose one frame at `time_ms` into `backend`.
    pub fn tick<B: DrawBackend + ?Sized>(&mut self, time_ms: f64, backend: &mut B) {
        let frame = FrameContext {
            time_ms,
            canvas: self.canvas,
        };
        self.compositor.compose_frame(&frame, &self.parallax, backend);
    }

    /// Regenerate a single layer with fresh randomness.
    pub fn refresh_layer(&mut self, id: LayerId) -> bool {
        let ctx = RegenContext {
            canvas: self.canvas,
            growth: &self.config.growth,
            show_leaves: self.config.show_leaves,
            jitter_px: self.config.jitter_px,
        };
        self.compositor.refresh_layer(id, &ctx, &mut self.rng)
    }

    /// Regenerate every layer with fresh randomness.
    pub fn regenerate(&mut self) {
        let ctx = RegenContext {
            canvas: self.canvas,
            growth: &self.config.growth,
            show_leaves: self.config.show_leaves,
            jitter_px: self.config.jitter_px,
        };
        self.compositor.regenerate(&ctx, &mut self.rng);
    }

    pub fn set_layer_enabled(&mut self, id: LayerId, enabled: bool) {
        self.compositor.set_layer_enabled(id, enabled);
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.compositor.get_layer(id)
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn parallax(&self) -> &ParallaxController {
        &self.parallax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;
    use crate::grass::GrassBladeParams;
    use crate::layer::{LayerKind, RecordingBackend};
    use crate::tree::TreeSeed;

    fn scene(width: f32, height: f32) -> SceneState {
        SceneState::new(SceneConfig::default(), CanvasSize::new(width, height), seeded(42))
    }

    fn seeds(state: &SceneState, id: LayerId) -> Vec<TreeSeed> {
        match &state.layer(id).expect("layer").kind {
            LayerKind::Trees(row) => row.seeds.clone(),
            _ => panic!("not a tree layer"),
        }
    }

    fn blades(state: &SceneState, id: LayerId) -> Vec<GrassBladeParams> {
        match &state.layer(id).expect("layer").kind {
            LayerKind::Grass(grass) => grass.blades.clone(),
            _ => panic!("not a grass layer"),
        }
    }

    #[test]
    fn test_new_generates_everything() {
        let state = scene(800.0, 600.0);
        for id in [LayerId::TREES_FAR, LayerId::TREES_MID, LayerId::TREES_NEAR] {
            assert!(!seeds(&state, id).is_empty());
        }
        for id in [LayerId::GRASS_FAR, LayerId::GRASS_MID, LayerId::GRASS_NEAR] {
            assert!(!blades(&state, id).is_empty());
        }
        assert_eq!(seeds(&state, LayerId::TREES_FAR)[0].position.y, 570.0);
        assert_eq!(seeds(&state, LayerId::TREES_MID)[0].position.y, 580.0);
        assert_eq!(seeds(&state, LayerId::TREES_NEAR)[0].position.y, 590.0);
    }

    #[test]
    fn test_resize_resamples() {
        let mut state = scene(800.0, 600.0);
        let trees_before = seeds(&state, LayerId::TREES_MID);
        let grass_before = blades(&state, LayerId::GRASS_NEAR);

        state.resize(1200.0, 800.0);
        assert_eq!(state.canvas(), CanvasSize::new(1200.0, 800.0));

        let far = seeds(&state, LayerId::TREES_FAR);
        let mid = seeds(&state, LayerId::TREES_MID);
        let near = seeds(&state, LayerId::TREES_NEAR);
        assert!(far.iter().all(|s| s.position.y == 770.0));
        assert!(mid.iter().all(|s| s.position.y == 780.0));
        assert!(near.iter().all(|s| s.position.y == 790.0));
        assert_ne!(mid, trees_before);
        assert_ne!(blades(&state, LayerId::GRASS_NEAR), grass_before);

        // Seeds spread over the wider surface
        let last = mid.last().expect("seed").position.x;
        assert!(last > 800.0);
    }

    #[test]
    fn test_same_size_resize_regenerates() {
        let mut state = scene(800.0, 600.0);
        let trees = seeds(&state, LayerId::TREES_FAR);
        let grass = blades(&state, LayerId::GRASS_FAR);
        state.resize(800.0, 600.0);
        assert_eq!(state.canvas(), CanvasSize::new(800.0, 600.0));
        assert_ne!(seeds(&state, LayerId::TREES_FAR), trees);
        assert_ne!(blades(&state, LayerId::GRASS_FAR), grass);
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut state = scene(800.0, 600.0);
        let before = seeds(&state, LayerId::TREES_NEAR);
        state.resize(0.0, 600.0);
        state.resize(800.0, 0.0);
        assert_eq!(state.canvas(), CanvasSize::new(800.0, 600.0));
        assert_eq!(seeds(&state, LayerId::TREES_NEAR), before);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = scene(800.0, 600.0);
        let b = scene(800.0, 600.0);
        assert_eq!(seeds(&a, LayerId::TREES_FAR), seeds(&b, LayerId::TREES_FAR));
        assert_eq!(blades(&a, LayerId::GRASS_MID), blades(&b, LayerId::GRASS_MID));
    }

    #[test]
    fn test_pointer_moved() {
        let mut state = scene(800.0, 600.0);
        state.pointer_moved(800.0, 0.0);
        assert_eq!(state.parallax().pointer(), glam::Vec2::new(1.0, 1.0));
        state.pointer_moved(400.0, 300.0);
        assert_eq!(state.parallax().pointer(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_tick_composes_frame() {
        let mut state = scene(800.0, 600.0);
        let mut backend = RecordingBackend::new();
        state.tick(16.0, &mut backend);
        state.tick(32.0, &mut backend);
        assert_eq!(backend.frames.len(), 2);
        assert!(backend.frames.iter().all(|f| f.finished));
        assert_eq!(backend.last_layer_order().len(), 8);
    }

    #[test]
    fn test_refresh_layer_leaves_others() {
        let mut state = scene(800.0, 600.0);
        let far = seeds(&state, LayerId::TREES_FAR);
        let grass = blades(&state, LayerId::GRASS_FAR);
        assert!(state.refresh_layer(LayerId::GRASS_FAR));
        assert_eq!(seeds(&state, LayerId::TREES_FAR), far);
        assert_ne!(blades(&state, LayerId::GRASS_FAR), grass);
    }

    #[test]
    fn test_seed_from_config() {
        let config = SceneConfig::default().with_seed(5);
        let a = SceneState::from_config(config.clone(), CanvasSize::new(640.0, 480.0));
        let b = SceneState::from_config(config, CanvasSize::new(640.0, 480.0));
        assert_eq!(seeds(&a, LayerId::TREES_MID), seeds(&b, LayerId::TREES_MID));
    }
}
