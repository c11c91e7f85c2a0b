//! wgpu implementation of the draw seam.
//!
//! Batches are flattened on the CPU into one clip-space coloured triangle
//! list per frame. The light glow is drawn first over the clear colour, then
//! the geometry in submission order, all in a single render pass.

use glam::Vec2;

use crate::core::{CanvasSize, Rgba};
use crate::layer::draw::{to_clip, triangulate};
use crate::layer::{DrawBackend, DrawBatch, LightUniforms};

use super::pipeline::{FlatPipeline, FlatVertex, LightPipeline};

/// CPU side of a frame: clear colour, optional light and flattened vertices.
#[derive(Debug)]
pub struct FrameGeometry {
    canvas: CanvasSize,
    clear: Rgba,
    light: Option<LightUniforms>,
    vertices: Vec<FlatVertex>,
    scratch: Vec<Vec2>,
}

impl FrameGeometry {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            clear: [0.0, 0.0, 0.0, 1.0],
            light: None,
            vertices: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    pub fn clear(&self) -> Rgba {
        self.clear
    }

    pub fn light(&self) -> Option<&LightUniforms> {
        self.light.as_ref()
    }

    pub fn vertices(&self) -> &[FlatVertex] {
        &self.vertices
    }
}

impl DrawBackend for FrameGeometry {
    fn begin_frame(&mut self, clear: Rgba) {
        self.clear = clear;
        self.light = None;
        self.vertices.clear();
    }

    fn draw_light(&mut self, light: &LightUniforms) {
        self.light = Some(*light);
    }

    fn draw(&mut self, batch: &DrawBatch<'_>) {
        self.scratch.clear();
        triangulate(batch.topology, batch.vertices, &mut self.scratch);
        let canvas = self.canvas;
        self.vertices.extend(self.scratch.iter().map(|&v| FlatVertex {
            position: to_clip(v, batch.space, canvas).to_array(),
            color: batch.color,
        }));
    }

    fn end_frame(&mut self) {}
}

/// Draws composed frames to a surface texture.
pub struct WgpuBackend {
    flat: FlatPipeline,
    light: LightPipeline,
    frame: FrameGeometry,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, canvas: CanvasSize) -> Self {
        Self {
            flat: FlatPipeline::new(device, surface_format),
            light: LightPipeline::new(device, surface_format),
            frame: FrameGeometry::new(canvas),
        }
    }

    pub fn resize(&mut self, canvas: CanvasSize) {
        self.frame.set_canvas(canvas);
    }

    /// Upload the composed frame and record its render pass into `encoder`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        self.flat.upload(device, queue, &self.frame.vertices);
        if let Some(light) = &self.frame.light {
            self.light.update(queue, light);
        }

        let [r, g, b, a] = self.frame.clear;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("limbo_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.frame.light.is_some() {
            self.light.draw(&mut pass);
        }
        self.flat.draw(&mut pass);
    }
}

impl DrawBackend for WgpuBackend {
    fn begin_frame(&mut self, clear: Rgba) {
        self.frame.begin_frame(clear);
    }

    fn draw_light(&mut self, light: &LightUniforms) {
        self.frame.draw_light(light);
    }

    fn draw(&mut self, batch: &DrawBatch<'_>) {
        self.frame.draw(batch);
    }

    fn end_frame(&mut self) {
        self.frame.end_frame();
    }
}
