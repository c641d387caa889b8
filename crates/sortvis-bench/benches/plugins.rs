//! Criterion benchmarks for individual plug-ins, with and without
//! instrumentation.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sortvis_algorithm::SortAlgorithm;
use sortvis_algorithms::{
    InsertionSort, MergeSort, ParallelMergeSort, ParallelQuickSort, QuickSort, ReferenceSort,
};
use sortvis_bench::{default_registry, headless, run_plan, BENCH_TICKS};
use sortvis_core::{Dataset, NaturalOrder};
use sortvis_engine::InstrumentedComparator;

fn shared(plugin: impl SortAlgorithm) -> Arc<dyn SortAlgorithm> {
    Arc::new(plugin)
}

fn plugins() -> Vec<(&'static str, Arc<dyn SortAlgorithm>)> {
    vec![
        ("insertion", shared(InsertionSort)),
        ("merge", shared(MergeSort)),
        ("quick", shared(QuickSort)),
        ("parallel_merge", shared(ParallelMergeSort::default())),
        ("parallel_quick", shared(ParallelQuickSort::default())),
        ("reference", shared(ReferenceSort)),
    ]
}

fn bench_natural_order(c: &mut Criterion) {
    let base = run_plan(&default_registry(), 2_000, 42).lanes[0]
        .dataset
        .values();
    let mut group = c.benchmark_group("natural_order_2k");
    for (name, plugin) in plugins() {
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter_batched(
                || Dataset::from_values(base.iter().copied()),
                |data| {
                    data.run_task(|lane| plugin.sort(lane, &NaturalOrder));
                    black_box(data)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_instrumented(c: &mut Criterion) {
    let mut group = c.benchmark_group("instrumented_500");
    for (name, plugin) in plugins() {
        let plan = run_plan(&default_registry(), 500, 7);
        let dataset = Arc::clone(&plan.lanes[0].dataset);
        let base = dataset.values();
        let (surface, _orchestrator) = headless(&plan);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                dataset.reseed_from(&base);
                let cmp = InstrumentedComparator::new(surface.clone(), BENCH_TICKS);
                dataset.run_task(|lane| plugin.sort(lane, &cmp));
                black_box(cmp.comparisons())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_natural_order, bench_instrumented);
criterion_main!(benches);
