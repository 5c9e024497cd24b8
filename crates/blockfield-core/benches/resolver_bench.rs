use blockfield_core::resolver::{AnalyticResolver, ContactResolver, ProbeResolver};
use blockfield_core::{InputState, SceneConfig, ScriptedInput, Simulation};
use blockfield_core::blockfield_geom::{box_of, Cuboid};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;

fn bench_resolve_shallow(c: &mut Criterion) {
    // One step into the block, the common case while walking into a wall
    let block = box_of(Vec3::new(12.0, 0.0, 6.0), Vec3::splat(0.5));
    let player = Cuboid::unit(Vec3::new(12.0, 0.0, 5.05));
    let probe = ProbeResolver::new();
    let analytic = AnalyticResolver::new();

    c.bench_function("resolve_shallow_probe", |b| {
        b.iter(|| probe.resolve(black_box(&player), black_box(&block)))
    });
    c.bench_function("resolve_shallow_analytic", |b| {
        b.iter(|| analytic.resolve(black_box(&player), black_box(&block)))
    });
}

fn bench_resolve_deep(c: &mut Criterion) {
    // Centers coincide: every side needs a full box width of probing
    let block = box_of(Vec3::ZERO, Vec3::splat(0.5));
    let player = Cuboid::unit(Vec3::new(0.1, 0.0, -0.1));
    let probe = ProbeResolver::new();
    let analytic = AnalyticResolver::new();

    c.bench_function("resolve_deep_probe", |b| {
        b.iter(|| probe.resolve(black_box(&player), black_box(&block)))
    });
    c.bench_function("resolve_deep_analytic", |b| {
        b.iter(|| analytic.resolve(black_box(&player), black_box(&block)))
    });
}

fn bench_scene_ticks(c: &mut Criterion) {
    // Default scene, 300 scripted ticks per iteration
    let config = SceneConfig::default();
    let script: ScriptedInput = "forward*100, forward+left*100, back+right*100"
        .parse()
        .expect("valid script");

    c.bench_function("scene_300_ticks", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(&config).expect("valid config");
            let mut input = script.clone();
            black_box(sim.run(300, &mut input).expect("ticks resolve"))
        })
    });

    let mut sim = Simulation::new(&config).expect("valid config");
    c.bench_function("scene_single_tick", |b| {
        b.iter(|| black_box(sim.tick(black_box(InputState::FORWARD))))
    });
}

criterion_group!(benches, bench_resolve_shallow, bench_resolve_deep, bench_scene_ticks);
criterion_main!(benches);
