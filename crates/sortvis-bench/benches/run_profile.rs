//! Criterion benchmarks for whole runs through the orchestrator.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sortvis_bench::{default_registry, headless, run_plan};

fn bench_all_lanes_200(c: &mut Criterion) {
    let registry = default_registry();
    let plan = run_plan(&registry, 200, 42);
    let base = plan.lanes[0].dataset.values();
    let (_surface, orchestrator) = headless(&plan);

    c.bench_function("all_lanes_200", |b| {
        b.iter(|| {
            for lane in &plan.lanes {
                lane.dataset.reseed_from(&base);
            }
            let report = orchestrator.run_blocking(plan.clone());
            black_box(report.metrics.comparisons);
        });
    });
}

fn bench_launch_overhead(c: &mut Criterion) {
    let mut registry = default_registry();
    registry.clear_selection();
    if let Some(id) = registry.find("Insertion") {
        registry.set_selected(id, true);
    }
    let plan = run_plan(&registry, 16, 1);
    let (_surface, orchestrator) = headless(&plan);

    c.bench_function("launch_and_wait_16", |b| {
        b.iter(|| {
            let handle = orchestrator.launch(plan.clone()).unwrap();
            black_box(handle.wait().unwrap());
        });
    });
}

criterion_group!(benches, bench_all_lanes_200, bench_launch_overhead);
criterion_main!(benches);
