//! Sortvis: concurrent sort orchestration with comparison-driven animation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! sortvis sub-crates. Plug-ins sort their lane through a comparator that
//! highlights both operands and repaints every lane before returning, so the
//! animation advances exactly one frame per ordering decision.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sortvis::engine::surface::NullCanvas;
//! use sortvis::prelude::*;
//!
//! // An extra plug-in next to the reference set.
//! struct Exchange;
//! impl SortAlgorithm for Exchange {
//!     fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
//!         for i in 0..lane.len() {
//!             for j in i + 1..lane.len() {
//!                 if !lane.compare(cmp, i, j) {
//!                     lane.swap(i, j);
//!                 }
//!             }
//!         }
//!     }
//! }
//!
//! let mut registry = AlgorithmRegistry::new();
//! sortvis::algorithms::register_defaults(&mut registry).unwrap();
//! registry.register("Exchange", Exchange).unwrap();
//!
//! // Run two lanes over copies of one shuffled sequence, headless.
//! let surface = Arc::new(SharedSurface::new(NullCanvas, Geometry::new(40, 10)));
//! let orchestrator = Orchestrator::new(surface.clone(), 5);
//! let base = Dataset::from_values([5, 3, 1, 4, 2]);
//! let lanes: Vec<PlannedLane> = ["Parallel Merge", "Exchange"]
//!     .into_iter()
//!     .map(|name| {
//!         let id = registry.find(name).unwrap();
//!         let entry = registry.get(id).unwrap();
//!         PlannedLane {
//!             algorithm: id,
//!             name: entry.name.clone(),
//!             sorter: Arc::clone(&entry.algorithm),
//!             dataset: Arc::new(base.clone()),
//!         }
//!     })
//!     .collect();
//! surface.bind(
//!     lanes
//!         .iter()
//!         .map(|l| LaneBinding { name: l.name.clone(), dataset: l.dataset.clone() })
//!         .collect(),
//! );
//!
//! let report = orchestrator.run_blocking(RunPlan { id: RunId(1), lanes: lanes.clone() });
//! assert!(report.is_clean());
//! for lane in &lanes {
//!     assert_eq!(lane.dataset.values(), [1, 2, 3, 4, 5]);
//! }
//! assert_eq!(surface.geometry(), Geometry::new(40, 20));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sortvis-core` | Elements, datasets, lane views, task ledger, IDs |
//! | [`algorithm`] | `sortvis-algorithm` | Plug-in trait and registry |
//! | [`algorithms`] | `sortvis-algorithms` | Reference plug-ins, sequential and parallel |
//! | [`engine`] | `sortvis-engine` | Surface, orchestrator, interaction state machine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Elements, datasets and fork/join lane views (`sortvis-core`).
///
/// [`types::LaneSlice`] is the only way a plug-in touches its data; every
/// access is bounds-checked against the task's assigned range.
pub use sortvis_core as types;

/// Plug-in contract and registry (`sortvis-algorithm`).
pub use sortvis_algorithm as algorithm;

/// Reference plug-ins (`sortvis-algorithms`).
///
/// [`algorithms::register_defaults`] installs all of them.
pub use sortvis_algorithms as algorithms;

/// Surface, orchestrator and interaction state machine (`sortvis-engine`).
///
/// [`engine::Animator`] drives a whole session; [`engine::Orchestrator`]
/// runs a single plan without the state machine.
pub use sortvis_engine as engine;

/// Common imports for typical sortvis usage.
///
/// ```rust
/// use sortvis::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sortvis_core::{
        AlgorithmId, Comparator, Dataset, Element, LaneSlice, RunError, RunId, Slot,
    };

    // Plug-ins
    pub use sortvis_algorithm::{from_fn, AlgorithmRegistry, RegistryError, SortAlgorithm};

    // Engine
    pub use sortvis_engine::{
        Animator, AnimatorConfig, Canvas, Frame, Geometry, HelpDocument, Input, Key,
        LaneBinding, Mode, Orchestrator, PlannedLane, RunPlan, RunReport, SharedSurface,
        StartupError,
    };
}
