//! Build a scene headlessly and print a JSON summary of one frame.
//!
//! Usage: cargo run --bin limbo-dump -- --width 1280 --height 720 --seed 7 --time 1500 [--config scene.json] [--out frame.json]

use std::path::PathBuf;

use glam::Vec2;
use serde::Serialize;

use limbo::core::{CanvasSize, Rgba};
use limbo::layer::draw::{RecordedBatch, RecordingBackend};
use limbo::layer::{CoordSpace, LayerId, Topology};
use limbo::scene::{SceneConfig, SceneState};

#[derive(Serialize)]
struct FrameSummary {
    width: f32,
    height: f32,
    seed: u64,
    time_ms: f64,
    clear: Rgba,
    light: Option<LightSummary>,
    total_vertices: usize,
    total_triangles: usize,
    batches: Vec<BatchSummary>,
}

#[derive(Serialize)]
struct LightSummary {
    flicker: f32,
    radius: f32,
}

#[derive(Serialize)]
struct BatchSummary {
    layer: LayerId,
    name: String,
    space: CoordSpace,
    topology: Topology,
    color: Rgba,
    vertices: usize,
    triangles: usize,
    min: [f32; 2],
    max: [f32; 2],
}

fn summarize(batch: &RecordedBatch, scene: &SceneState) -> BatchSummary {
    let (min, max) = batch.vertices.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), v| (min.min(*v), max.max(*v)),
    );
    let (min, max) = if batch.vertices.is_empty() { (Vec2::ZERO, Vec2::ZERO) } else { (min, max) };

    BatchSummary {
        layer: batch.layer,
        name: scene.layer(batch.layer).map(|l| l.name.clone()).unwrap_or_default(),
        space: batch.space,
        topology: batch.topology,
        color: batch.color,
        vertices: batch.vertices.len(),
        triangles: batch.triangle_count(),
        min: min.to_array(),
        max: max.to_array(),
    }
}

fn arg<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn main() -> limbo::core::Result<()> {
    limbo::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let width: f32 = arg(&args, "--width").unwrap_or(1280.0);
    let height: f32 = arg(&args, "--height").unwrap_or(720.0);
    let time_ms: f64 = arg(&args, "--time").unwrap_or(0.0);
    let out: Option<PathBuf> = arg(&args, "--out");

    let mut config = match arg::<PathBuf>(&args, "--config") {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };
    let seed = arg(&args, "--seed").or(config.seed).unwrap_or(1);
    config.seed = Some(seed);

    let mut scene = SceneState::from_config(config, CanvasSize::new(width, height));
    let mut backend = RecordingBackend::new();
    scene.tick(time_ms, &mut backend);

    let Some(frame) = backend.last_frame() else {
        return Ok(());
    };

    let batches: Vec<BatchSummary> = frame.batches.iter().map(|b| summarize(b, &scene)).collect();
    let summary = FrameSummary {
        width,
        height,
        seed,
        time_ms,
        clear: frame.clear,
        light: frame.light.map(|l| LightSummary {
            flicker: l.flicker,
            radius: l.radius_base + l.radius_wobble * (l.time * 0.7).sin(),
        }),
        total_vertices: batches.iter().map(|b| b.vertices).sum(),
        total_triangles: batches.iter().map(|b| b.triangles).sum(),
        batches,
    };

    let json = serde_json::to_string_pretty(&summary)?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)?;
            log::info!("Wrote frame summary to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
