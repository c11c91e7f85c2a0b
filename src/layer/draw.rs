//! Draw seam between the compositor and a graphics backend.
//!
//! The compositor describes each frame as a clear, an optional light quad
//! and a sequence of coloured vertex batches. Backends decide how to upload
//! and draw them; `RecordingBackend` keeps them in memory.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::light::LightUniforms;
use super::LayerId;
use crate::core::{CanvasSize, Rgba};

/// Coordinate space of a batch's vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordSpace {
    /// Normalized device coordinates, y up
    Ndc,
    /// Surface pixels, origin top-left, y down
    Pixels,
}

/// How a batch's vertices form triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    TriangleList,
    /// Consecutive independent fans of `fan_len` vertices each
    TriangleFan { fan_len: usize },
    TriangleStrip,
}

/// One draw call's worth of geometry.
#[derive(Clone, Copy, Debug)]
pub struct DrawBatch<'a> {
    pub layer: LayerId,
    pub space: CoordSpace,
    pub topology: Topology,
    pub color: Rgba,
    pub vertices: &'a [Vec2],
}

impl DrawBatch<'_> {
    pub fn triangle_count(&self) -> usize {
        triangle_count(self.topology, self.vertices.len())
    }
}

/// Receives one composed frame at a time.
pub trait DrawBackend {
    fn begin_frame(&mut self, clear: Rgba);
    /// Alpha-blended ambient light over the whole surface
    fn draw_light(&mut self, light: &LightUniforms);
    /// Opaque geometry, drawn in call order
    fn draw(&mut self, batch: &DrawBatch<'_>);
    fn end_frame(&mut self);
}

/// Number of triangles `vertex_count` vertices form under `topology`.
pub fn triangle_count(topology: Topology, vertex_count: usize) -> usize {
    match topology {
        Topology::TriangleList => vertex_count / 3,
        Topology::TriangleFan { fan_len } if fan_len >= 3 => (vertex_count / fan_len) * (fan_len - 2),
        Topology::TriangleFan { .. } => 0,
        Topology::TriangleStrip => vertex_count.saturating_sub(2),
    }
}

/// Expand any topology into a triangle list appended to `out`. Each fan
/// chunk is expanded on its own, so fans never bridge between blades.
pub fn triangulate(topology: Topology, vertices: &[Vec2], out: &mut Vec<Vec2>) {
    match topology {
        Topology::TriangleList => {
            let whole = vertices.len() - vertices.len() % 3;
            out.extend_from_slice(&vertices[..whole]);
        }
        Topology::TriangleFan { fan_len } => {
            if fan_len < 3 {
                return;
            }
            for fan in vertices.chunks_exact(fan_len) {
                for i in 1..fan_len - 1 {
                    out.extend_from_slice(&[fan[0], fan[i], fan[i + 1]]);
                }
            }
        }
        Topology::TriangleStrip => {
            for i in 0..vertices.len().saturating_sub(2) {
                if i % 2 == 0 {
                    out.extend_from_slice(&[vertices[i], vertices[i + 1], vertices[i + 2]]);
                } else {
                    out.extend_from_slice(&[vertices[i + 1], vertices[i], vertices[i + 2]]);
                }
            }
        }
    }
}

/// Map a vertex to clip space.
pub fn to_clip(v: Vec2, space: CoordSpace, canvas: CanvasSize) -> Vec2 {
    match space {
        CoordSpace::Ndc => v,
        CoordSpace::Pixels => {
            let size = Vec2::new(canvas.width.max(1.0), canvas.height.max(1.0));
            (v / size * 2.0 - Vec2::ONE) * Vec2::new(1.0, -1.0)
        }
    }
}

/// A batch as captured by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedBatch {
    pub layer: LayerId,
    pub space: CoordSpace,
    pub topology: Topology,
    pub color: Rgba,
    pub vertices: Vec<Vec2>,
}

impl RecordedBatch {
    pub fn triangle_count(&self) -> usize {
        triangle_count(self.topology, self.vertices.len())
    }
}

/// Everything submitted between `begin_frame` and `end_frame`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedFrame {
    pub clear: Rgba,
    pub light: Option<LightUniforms>,
    pub batches: Vec<RecordedBatch>,
    pub finished: bool,
}

/// Backend that keeps submitted frames in memory, for tests, benches and
/// headless inspection.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub frames: Vec<RecordedFrame>,
    /// Keep only the most recent frame
    pub keep_last_only: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Draw order of the last frame as layer ids, one entry per batch
    pub fn last_layer_order(&self) -> Vec<LayerId> {
        self.last_frame()
            .map(|f| f.batches.iter().map(|b| b.layer).collect())
            .unwrap_or_default()
    }
}

impl DrawBackend for RecordingBackend {
    fn begin_frame(&mut self, clear: Rgba) {
        if self.keep_last_only {
            self.frames.clear();
        }
        self.frames.push(RecordedFrame {
            clear,
            ..Default::default()
        });
    }

    fn draw_light(&mut self, light: &LightUniforms) {
        if let Some(frame) = self.frames.last_mut() {
            frame.light = Some(*light);
        }
    }

    fn draw(&mut self, batch: &DrawBatch<'_>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.batches.push(RecordedBatch {
                layer: batch.layer,
                space: batch.space,
                topology: batch.topology,
                color: batch.color,
                vertices: batch.vertices.to_vec(),
            });
        }
    }

    fn end_frame(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.finished = true;
        }
    }
}
