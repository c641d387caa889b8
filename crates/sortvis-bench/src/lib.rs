//! Benchmark profiles and utilities for sortvis.
//!
//! - [`default_registry`]: every reference plug-in, all selected
//! - [`run_plan`]: one lane per selected plug-in over copies of one
//!   shuffled base sequence
//! - [`headless`]: a surface and orchestrator that paint into a
//!   [`NullCanvas`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sortvis_algorithm::AlgorithmRegistry;
use sortvis_algorithms::register_defaults;
use sortvis_core::{Dataset, RunId};
use sortvis_engine::surface::NullCanvas;
use sortvis_engine::{Geometry, LaneBinding, Orchestrator, PlannedLane, RunPlan, SharedSurface};

/// Highlight ticks used by [`headless`].
pub const BENCH_TICKS: u8 = 5;

/// Registry with every reference plug-in registered and selected.
pub fn default_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();
    if let Err(e) = register_defaults(&mut registry) {
        panic!("reference plug-ins failed to register: {e}");
    }
    for id in 0..registry.len() {
        registry.set_selected(id.into(), true);
    }
    registry
}

/// Build a plan over the registry's selected plug-ins. Every lane gets a
/// copy of the same shuffle of `1..=n`, drawn from `seed`.
pub fn run_plan(registry: &AlgorithmRegistry, n: u32, seed: u64) -> RunPlan {
    let base = Dataset::shuffled(n, &mut ChaCha8Rng::seed_from_u64(seed));
    let lanes = registry
        .selected_ids()
        .into_iter()
        .filter_map(|id| {
            let entry = registry.get(id)?;
            Some(PlannedLane {
                algorithm: id,
                name: entry.name.clone(),
                sorter: Arc::clone(&entry.algorithm),
                dataset: Arc::new(base.clone()),
            })
        })
        .collect();
    RunPlan {
        id: RunId(seed),
        lanes,
    }
}

/// Surface bound to `plan`'s lanes, and an orchestrator repainting it.
pub fn headless(plan: &RunPlan) -> (Arc<SharedSurface<NullCanvas>>, Orchestrator) {
    let surface = Arc::new(SharedSurface::new(NullCanvas, Geometry::new(80, 24)));
    surface.bind(
        plan.lanes
            .iter()
            .map(|lane| LaneBinding {
                name: lane.name.clone(),
                dataset: Arc::clone(&lane.dataset),
            })
            .collect(),
    );
    let orchestrator = Orchestrator::new(surface.clone(), BENCH_TICKS);
    (surface, orchestrator)
}
