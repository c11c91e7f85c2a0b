//! Limbo - parallax silhouette forest background

use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use limbo::core::{input::PointerState, logging, time::FrameTimer, CanvasSize};
use limbo::render::{GpuContext, WgpuBackend, WindowConfig};
use limbo::scene::{SceneConfig, SceneState};

/// Frames between fps log lines
const FPS_LOG_INTERVAL: u64 = 600;

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    backend: Option<WgpuBackend>,
    scene: Option<SceneState>,
    pointer: PointerState,
    timer: FrameTimer,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            backend: None,
            scene: None,
            pointer: PointerState::new(1.0, 1.0),
            timer: FrameTimer::new(),
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(backend), Some(scene)) = (&self.gpu, &mut self.backend, &mut self.scene) else {
            return;
        };

        self.timer.tick();
        scene.tick(self.timer.elapsed_ms(), backend);

        let output = match gpu.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        backend.render(&gpu.device, &gpu.queue, &mut encoder, &view);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if self.timer.frame_count() % FPS_LOG_INTERVAL == 0 {
            let stats = self.timer.fps_stats();
            log::debug!(
                "FPS avg {:.1} (min {:.1}, max {:.1}) over {} frames, last frame {:.2} ms",
                stats.avg,
                stats.min,
                stats.max,
                stats.frame_count,
                self.timer.delta_secs() * 1000.0
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowConfig::default().create(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("Failed to create GPU context: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let canvas = CanvasSize::new(size.width as f32, size.height as f32);
        log::info!("Window created: {}x{}", size.width, size.height);
        log::info!("GPU: {}", gpu.adapter.get_info().name);

        self.pointer.set_surface_size(canvas.width, canvas.height);
        self.backend = Some(WgpuBackend::new(&gpu.device, gpu.format(), canvas));
        self.scene = Some(SceneState::from_config(self.config.clone(), canvas));
        self.gpu = Some(gpu);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    let canvas = CanvasSize::new(size.width as f32, size.height as f32);
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                    }
                    if let Some(backend) = &mut self.backend {
                        backend.resize(canvas);
                    }
                    if let Some(scene) = &mut self.scene {
                        scene.resize(canvas.width, canvas.height);
                    }
                    self.pointer.set_surface_size(canvas.width, canvas.height);
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if self.pointer.take_moved() {
                    let (x, y) = self.pointer.normalized();
                    if let Some(scene) = &mut self.scene {
                        scene.set_pointer(x, y);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Limbo starting...");

    let args: Vec<String> = std::env::args().collect();
    let mut config = match parse_config_arg(&args) {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };
    if let Some(seed) = parse_seed_arg(&args) {
        config.seed = Some(seed);
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    let mut app = App::new(config);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

/// Parse --config argument from command line
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Parse --seed argument from command line
fn parse_seed_arg(args: &[String]) -> Option<u64> {
    for i in 0..args.len() {
        if args[i] == "--seed" || args[i] == "-s" {
            if let Some(seed) = args.get(i + 1) {
                return seed.parse().ok();
            }
        }
    }
    None
}
