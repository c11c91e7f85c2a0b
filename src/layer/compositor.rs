//! Layer compositor.
//!
//! Owns the layer stack and turns it into one frame of draw calls. Tree rows
//! are baked on regeneration and only translated per frame; grass is rebuilt
//! every frame because sway follows continuous time.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;

use super::draw::{CoordSpace, DrawBackend, DrawBatch, Topology};
use super::{Layer, LayerId, LayerKind};
use crate::core::{CanvasSize, Rgba};
use crate::grass::{mesh, BLADE_FAN_LEN};
use crate::parallax::{translate_x, ParallaxController};
use crate::tree::GrowthParams;

/// Inputs shared by every layer regeneration.
#[derive(Clone, Copy, Debug)]
pub struct RegenContext<'a> {
    pub canvas: CanvasSize,
    pub growth: &'a GrowthParams,
    pub show_leaves: bool,
    /// Total horizontal jitter of tree seeds in pixels
    pub jitter_px: f32,
}

/// Per-frame inputs.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Animation timestamp in milliseconds
    pub time_ms: f64,
    pub canvas: CanvasSize,
}

/// Manages the layer stack and composes frames.
pub struct LayerCompositor {
    /// Layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Draw order (computed from layer priorities)
    render_order: Vec<LayerId>,
    clear_color: Rgba,
    /// Reused per-frame vertex scratch
    scratch: Vec<Vec2>,
}

impl LayerCompositor {
    pub fn new(clear_color: Rgba) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            clear_color,
            scratch: Vec::new(),
        }
    }

    pub fn with_layers(clear_color: Rgba, layers: Vec<Layer>) -> Self {
        let mut compositor = Self::new(clear_color);
        for layer in layers {
            compositor.add_layer(layer);
        }
        compositor
    }

    /// Add a layer, replacing any layer with the same id.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.insert(layer.id, layer);
        self.rebuild_render_order();
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let layer = self.layers.remove(&id);
        if layer.is_some() {
            self.rebuild_render_order();
        }
        layer
    }

    pub fn get_layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn get_layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    pub fn set_layer_enabled(&mut self, id: LayerId, enabled: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.enabled = enabled;
        }
    }

    /// Enabled layers in draw order (back to front).
    pub fn render_order(&self) -> impl Iterator<Item = &Layer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .filter(|layer| layer.enabled)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Regenerate every layer, in draw order so a seeded RNG gives the same
    /// scene every time.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, ctx: &RegenContext<'_>, rng: &mut R) {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get_mut(id) {
                layer.regenerate(ctx, rng);
            }
        }
        log::debug!(
            "Regenerated {} layers for {}x{} surface",
            self.layers.len(),
            ctx.canvas.width,
            ctx.canvas.height
        );
    }

    /// Regenerate a single layer. Returns false if no such layer exists.
    pub fn refresh_layer<R: Rng + ?Sized>(&mut self, id: LayerId, ctx: &RegenContext<'_>, rng: &mut R) -> bool {
        match self.layers.get_mut(&id) {
            Some(layer) => {
                layer.regenerate(ctx, rng);
                log::debug!("Refreshed layer '{}'", layer.name);
                true
            }
            None => false,
        }
    }

    /// Compose one frame into `backend`.
    pub fn compose_frame<B: DrawBackend + ?Sized>(
        &mut self,
        frame: &FrameContext,
        parallax: &ParallaxController,
        backend: &mut B,
    ) {
        let Self { layers, render_order, clear_color, scratch } = self;
        let time_secs = (frame.time_ms * 0.001) as f32;

        backend.begin_frame(*clear_color);

        for id in render_order.iter() {
            let Some(layer) = layers.get(id) else { continue };
            if !layer.enabled {
                continue;
            }

            match &layer.kind {
                LayerKind::FlickerLight(light) => {
                    backend.draw_light(&light.uniforms(frame.time_ms));
                }
                LayerKind::Trees(row) => {
                    let dx = parallax.tree_offset(row.config.parallax_strength, frame.canvas.width);
                    translate_x(&row.mesh.trunk, dx, scratch);
                    scratch.extend(row.mesh.leaves.iter().map(|v| Vec2::new(v.x + dx, v.y)));
                    if scratch.is_empty() {
                        continue;
                    }
                    backend.draw(&DrawBatch {
                        layer: layer.id,
                        space: CoordSpace::Pixels,
                        topology: Topology::TriangleList,
                        color: row.config.color,
                        vertices: scratch.as_slice(),
                    });
                }
                LayerKind::Grass(grass) => {
                    scratch.clear();
                    mesh::build_into(&grass.blades, time_secs, scratch);
                    if scratch.is_empty() {
                        continue;
                    }
                    let dx = parallax.grass_offset(grass.config.parallax_strength);
                    if dx != 0.0 {
                        for v in scratch.iter_mut() {
                            v.x += dx;
                        }
                    }
                    let batch = DrawBatch {
                        layer: layer.id,
                        space: CoordSpace::Ndc,
                        topology: Topology::TriangleFan { fan_len: BLADE_FAN_LEN },
                        color: grass.config.color,
                        vertices: scratch.as_slice(),
                    };
                    for _ in 0..grass.config.passes {
                        backend.draw(&batch);
                    }
                }
                LayerKind::GroundBar(bar) => {
                    let vertices = bar.vertices();
                    backend.draw(&DrawBatch {
                        layer: layer.id,
                        space: CoordSpace::Ndc,
                        topology: Topology::TriangleStrip,
                        color: bar.color,
                        vertices: &vertices,
                    });
                }
            }
        }

        backend.end_frame();
    }

    /// Rebuild render order from layer priorities.
    fn rebuild_render_order(&mut self) {
        let mut order: Vec<_> = self.layers.values().map(|l| (l.priority, l.id)).collect();
        order.sort();
        self.render_order = order.into_iter().map(|(_, id)| id).collect();
    }
}

impl Default for LayerCompositor {
    fn default() -> Self {
        Self::new([0.55, 0.55, 0.6, 1.0])
    }
}
