//! Tree rows: seed placement across the surface and baked row geometry.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::growth::{grow_tree, GrowthParams};
use super::leaf::tessellate_leaves;
use super::node::Tree;
use super::tessellate::tessellate_tree;
use crate::core::rng::{RngExt, SceneRng};
use crate::core::{CanvasSize, Rgba};

/// Overscan on each edge, as a fraction of the surface width, so trees at
/// the visual edge are not clipped.
pub const EDGE_PAD: f32 = 0.18;

/// Default total horizontal jitter in pixels (±15px).
pub const DEFAULT_JITTER_PX: f32 = 30.0;

/// Base trunk thickness in pixels before the row's thickness scale.
const BASE_THICKNESS: f32 = 18.0;

/// One depth row of trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayerConfig {
    pub count: u32,
    /// Trunk bases sit this many pixels above the bottom of the surface
    pub base_y_offset: f32,
    /// Trunk length as a fraction of surface height
    pub height_scale: f32,
    pub thickness_scale: f32,
    pub color: Rgba,
    /// Pixel offset per unit of pointer x, per pixel of surface width
    pub parallax_strength: f32,
}

impl TreeLayerConfig {
    /// Farthest row: many thin, pale trees
    pub fn far() -> Self {
        Self {
            count: 21,
            base_y_offset: 30.0,
            height_scale: 0.38,
            thickness_scale: 1.2,
            color: [0.38, 0.38, 0.41, 1.0],
            parallax_strength: 0.001,
        }
    }

    pub fn mid() -> Self {
        Self {
            count: 14,
            base_y_offset: 20.0,
            height_scale: 0.48,
            thickness_scale: 2.2,
            color: [0.16, 0.16, 0.18, 1.0],
            parallax_strength: 0.003,
        }
    }

    /// Nearest row: few, tall, black trees
    pub fn near() -> Self {
        Self {
            count: 7,
            base_y_offset: 10.0,
            height_scale: 0.60,
            thickness_scale: 2.8,
            color: [0.0, 0.0, 0.0, 1.0],
            parallax_strength: 0.007,
        }
    }

    /// Trunk base y for a surface of `canvas_height` pixels
    pub fn base_y(&self, canvas_height: f32) -> f32 {
        canvas_height - self.base_y_offset
    }
}

impl Default for TreeLayerConfig {
    fn default() -> Self {
        Self::mid()
    }
}

/// Sampled inputs for growing one tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSeed {
    pub position: Vec2,
    pub angle: f32,
    pub length: f32,
    pub thickness: f32,
    pub depth: u32,
    /// Seed for the tree's own random stream, so trees grow independently
    pub growth_seed: u64,
}

impl TreeSeed {
    pub fn grow(&self, params: &GrowthParams) -> Tree {
        let mut rng = SceneRng::seed_from_u64(self.growth_seed);
        grow_tree(self.position, self.angle, self.length, self.thickness, self.depth, params, &mut rng)
    }
}

/// Place `config.count` tree seeds evenly across the padded surface width.
pub fn sample_tree_row<R: Rng + ?Sized>(
    config: &TreeLayerConfig,
    canvas: CanvasSize,
    horizontal_jitter_px: f32,
    rng: &mut R,
) -> Vec<TreeSeed> {
    let min_x = -EDGE_PAD * canvas.width;
    let max_x = canvas.width + EDGE_PAD * canvas.width;
    let base_y = config.base_y(canvas.height);

    (0..config.count)
        .map(|i| {
            let t = (i + 1) as f32 / (config.count + 1) as f32;
            let x = min_x + t * (max_x - min_x) + rng.centered(horizontal_jitter_px);
            let angle = -FRAC_PI_2 + rng.centered(0.2);
            let length = canvas.height * config.height_scale * rng.offset(0.7, 0.3);
            let thickness = BASE_THICKNESS * config.thickness_scale * rng.offset(0.7, 0.5);
            let depth = rng.pick(3, 2);
            TreeSeed {
                position: Vec2::new(x, base_y),
                angle,
                length,
                thickness,
                depth,
                growth_seed: rng.next_u64(),
            }
        })
        .collect()
}

/// Baked pixel-space geometry of a whole row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeRowMesh {
    /// Trunk and branch ribbons, triangle list
    pub trunk: Vec<Vec2>,
    /// Leaf outlines, triangle list (empty unless leaves are enabled)
    pub leaves: Vec<Vec2>,
}

impl TreeRowMesh {
    pub fn vertex_count(&self) -> usize {
        self.trunk.len() + self.leaves.len()
    }
}

/// Grow every seed and bake the row. Trees are independent and grow in
/// parallel; output order follows seed order.
pub fn build_tree_row(seeds: &[TreeSeed], params: &GrowthParams, with_leaves: bool) -> TreeRowMesh {
    let parts: Vec<(Vec<Vec2>, Vec<Vec2>)> = seeds
        .par_iter()
        .map(|seed| {
            let tree = seed.grow(params);
            let mut trunk = Vec::new();
            tessellate_tree(&tree, &mut trunk);
            let mut leaves = Vec::new();
            if with_leaves {
                tessellate_leaves(&tree.leaves(), &mut leaves);
            }
            (trunk, leaves)
        })
        .collect();

    let mut mesh = TreeRowMesh::default();
    for (trunk, leaves) in parts {
        mesh.trunk.extend(trunk);
        mesh.leaves.extend(leaves);
    }
    mesh
}
