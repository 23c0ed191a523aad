use aura_studio::core::{HeadlessHost, Viewport};
use aura_studio::render::SoftwareBackend;
use aura_studio::scene::Variant;
use aura_studio::SceneRenderer;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SEED: u64 = 42;

fn mounted(variant: Variant, viewport: Viewport) -> (HeadlessHost, SceneRenderer<SoftwareBackend>) {
    let mut host = HeadlessHost::new(viewport.width, viewport.height);
    let renderer = SceneRenderer::mount(&mut host, SoftwareBackend::new(), variant, Some(SEED))
        .expect("headless host is laid out");
    (host, renderer)
}

/// Benchmark: one advance + raster pass per variant
fn bench_frame_per_variant(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let viewport = Viewport::new(320, 240);

    for variant in Variant::ALL {
        let (mut host, mut renderer) = mounted(variant, viewport);

        group.bench_with_input(BenchmarkId::new("variant", variant), &variant, |b, _| {
            b.iter(|| {
                for id in host.take_pending_frames() {
                    black_box(renderer.handle_frame(&mut host, id).unwrap());
                }
            })
        });
    }

    group.finish();
}

/// Benchmark: frame cost as the surface grows
fn bench_frame_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    group.sample_size(20);

    for (width, height) in [(160, 120), (640, 360), (1280, 720)] {
        let (mut host, mut renderer) = mounted(Variant::Primary, Viewport::new(width, height));

        group.bench_with_input(BenchmarkId::new("primary", format!("{}x{}", width, height)), &width, |b, _| {
            b.iter(|| {
                for id in host.take_pending_frames() {
                    black_box(renderer.handle_frame(&mut host, id).unwrap());
                }
            })
        });
    }

    group.finish();
}

/// Benchmark: full mount + teardown, the cost of a variant switch
fn bench_mount_teardown(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    for variant in Variant::ALL {
        group.bench_with_input(BenchmarkId::new("mount_teardown", variant), &variant, |b, &variant| {
            b.iter(|| {
                let (mut host, renderer) = mounted(variant, Viewport::new(320, 240));
                black_box(renderer.teardown(&mut host).stats())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame_per_variant, bench_frame_resolution, bench_mount_teardown);
criterion_main!(benches);
