use criterion::{criterion_group, criterion_main, Criterion, black_box};

use limbo::core::rng::seeded;
use limbo::core::CanvasSize;
use limbo::grass::{sample_grass_field, GrassLayerConfig, GrassMesh};
use limbo::layer::RecordingBackend;
use limbo::scene::{SceneConfig, SceneState};
use limbo::tree::{build_tree_row, sample_tree_row, GrowthParams, TreeLayerConfig, DEFAULT_JITTER_PX};

fn bench_scene_build(c: &mut Criterion) {
    c.bench_function("scene_build_1280x720", |b| {
        b.iter(|| {
            SceneState::new(
                SceneConfig::default(),
                black_box(CanvasSize::new(1280.0, 720.0)),
                seeded(42),
            )
        });
    });
}

fn bench_scene_resize(c: &mut Criterion) {
    let mut scene = SceneState::new(SceneConfig::default(), CanvasSize::new(1280.0, 720.0), seeded(42));
    let mut wide = false;

    c.bench_function("scene_resize", |b| {
        b.iter(|| {
            wide = !wide;
            let (w, h) = if wide { (1920.0, 1080.0) } else { (1280.0, 720.0) };
            scene.resize(black_box(w), black_box(h));
        });
    });
}

fn bench_tree_row(c: &mut Criterion) {
    let config = TreeLayerConfig::far();
    let params = GrowthParams::default();
    let seeds = sample_tree_row(&config, CanvasSize::new(1280.0, 720.0), DEFAULT_JITTER_PX, &mut seeded(7));

    c.bench_function("tree_row_far_grow", |b| {
        b.iter(|| build_tree_row(black_box(&seeds), &params, false));
    });
}

fn bench_grass_mesh(c: &mut Criterion) {
    let blades = sample_grass_field(&GrassLayerConfig::near(), &mut seeded(3));
    let mut time = 0.0f32;

    c.bench_function("grass_mesh_near", |b| {
        b.iter(|| {
            time += 0.016;
            GrassMesh::build(black_box(&blades), time)
        });
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut scene = SceneState::new(SceneConfig::default(), CanvasSize::new(1280.0, 720.0), seeded(42));
    let mut backend = RecordingBackend::new();
    backend.keep_last_only = true;
    let mut time_ms = 0.0f64;

    c.bench_function("compose_frame", |b| {
        b.iter(|| {
            time_ms += 16.0;
            scene.tick(black_box(time_ms), &mut backend);
        });
    });
}

criterion_group!(
    benches,
    bench_scene_build,
    bench_scene_resize,
    bench_tree_row,
    bench_grass_mesh,
    bench_frame,
);

criterion_main!(benches);
