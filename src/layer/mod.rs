//! Visual layers of the background.
//!
//! Layers are drawn back to front by priority with no depth test, so each
//! one paints over everything behind it.

pub mod compositor;
pub mod draw;
pub mod ground;
pub mod light;

pub use compositor::{FrameContext, LayerCompositor, RegenContext};
pub use draw::{CoordSpace, DrawBackend, DrawBatch, RecordingBackend, Topology};
pub use ground::GroundBar;
pub use light::{FlickerLight, LightUniforms};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grass::{sample_grass_field, GrassBladeParams, GrassLayerConfig};
use crate::tree::{build_tree_row, sample_tree_row, TreeLayerConfig, TreeRowMesh, TreeSeed};

/// Unique identifier for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl LayerId {
    pub const LIGHT: LayerId = LayerId(0);
    pub const TREES_FAR: LayerId = LayerId(1);
    pub const TREES_MID: LayerId = LayerId(2);
    pub const TREES_NEAR: LayerId = LayerId(3);
    pub const GRASS_FAR: LayerId = LayerId(4);
    pub const GRASS_MID: LayerId = LayerId(5);
    pub const GROUND: LayerId = LayerId(6);
    pub const GRASS_NEAR: LayerId = LayerId(7);
}

/// A row of trees with its baked base geometry (parallax offset excluded).
#[derive(Clone, Debug)]
pub struct TreeRowLayer {
    pub config: TreeLayerConfig,
    /// Seeds the current mesh was grown from
    pub seeds: Vec<TreeSeed>,
    pub mesh: TreeRowMesh,
}

impl TreeRowLayer {
    pub fn new(config: TreeLayerConfig) -> Self {
        Self {
            config,
            seeds: Vec::new(),
            mesh: TreeRowMesh::default(),
        }
    }

    /// Resample seeds for the current surface and regrow every tree.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, ctx: &RegenContext<'_>, rng: &mut R) {
        self.seeds = sample_tree_row(&self.config, ctx.canvas, ctx.jitter_px, rng);
        self.mesh = build_tree_row(&self.seeds, ctx.growth, ctx.show_leaves);
        log::debug!(
            "Grew {} trees at base_y {} ({} vertices)",
            self.seeds.len(),
            self.config.base_y(ctx.canvas.height),
            self.mesh.vertex_count()
        );
    }
}

/// A grass row: the sampled field, rebuilt into fans every frame.
#[derive(Clone, Debug)]
pub struct GrassLayer {
    pub config: GrassLayerConfig,
    pub blades: Vec<GrassBladeParams>,
}

impl GrassLayer {
    pub fn new(config: GrassLayerConfig) -> Self {
        Self {
            config,
            blades: Vec::new(),
        }
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.blades = sample_grass_field(&self.config, rng);
    }
}

/// What a layer draws.
#[derive(Clone, Debug)]
pub enum LayerKind {
    FlickerLight(FlickerLight),
    Trees(TreeRowLayer),
    Grass(GrassLayer),
    GroundBar(GroundBar),
}

/// A layer in the compositor.
#[derive(Clone, Debug)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Draw order, lower first
    pub priority: i32,
    pub enabled: bool,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            priority: id.0 as i32,
            enabled: true,
            kind,
        }
    }

    /// Regenerate size- or seed-dependent content. Light and ground have none.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, ctx: &RegenContext<'_>, rng: &mut R) {
        match &mut self.kind {
            LayerKind::Trees(row) => row.regenerate(ctx, rng),
            LayerKind::Grass(grass) => grass.regenerate(rng),
            LayerKind::FlickerLight(_) | LayerKind::GroundBar(_) => {}
        }
    }
}

/// The standard stack: light, three tree rows far to near, far and mid
/// grass, ground bar, near grass.
pub fn default_layers(
    light: Option<FlickerLight>,
    trees: [TreeLayerConfig; 3],
    grass: [GrassLayerConfig; 3],
    ground: GroundBar,
) -> Vec<Layer> {
    let [trees_far, trees_mid, trees_near] = trees;
    let [grass_far, grass_mid, grass_near] = grass;

    let mut layers = Vec::with_capacity(8);
    if let Some(light) = light {
        layers.push(Layer::new(LayerId::LIGHT, "Light", LayerKind::FlickerLight(light)));
    }
    layers.extend([
        Layer::new(LayerId::TREES_FAR, "Trees Far", LayerKind::Trees(TreeRowLayer::new(trees_far))),
        Layer::new(LayerId::TREES_MID, "Trees Mid", LayerKind::Trees(TreeRowLayer::new(trees_mid))),
        Layer::new(LayerId::TREES_NEAR, "Trees Near", LayerKind::Trees(TreeRowLayer::new(trees_near))),
        Layer::new(LayerId::GRASS_FAR, "Grass Far", LayerKind::Grass(GrassLayer::new(grass_far))),
        Layer::new(LayerId::GRASS_MID, "Grass Mid", LayerKind::Grass(GrassLayer::new(grass_mid))),
        Layer::new(LayerId::GROUND, "Ground", LayerKind::GroundBar(ground)),
        Layer::new(LayerId::GRASS_NEAR, "Grass Near", LayerKind::Grass(GrassLayer::new(grass_near))),
    ]);
    layers
}
