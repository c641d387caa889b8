//! Reference sorting plug-ins for sortvis.
//!
//! Sequential:
//! [`SelectionSort`], [`InsertionSort`], [`BubbleSort`], [`MergeSort`],
//! [`QuickSort`] and the oracle [`ReferenceSort`].
//!
//! Parallel (fork both halves with `LaneSlice::fork_join` down to a size
//! cutoff): [`ParallelMergeSort`], [`ParallelQuickSort`],
//! [`RandomizedParallelQuickSort`].
//!
//! [`register_defaults`] installs all of them under their display names.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod reference;
pub mod selection;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::{MergeSort, ParallelMergeSort};
pub use quick::{ParallelQuickSort, QuickSort, RandomizedParallelQuickSort};
pub use reference::ReferenceSort;
pub use selection::SelectionSort;

use sortvis_algorithm::{AlgorithmRegistry, RegistryError};

/// Below this many elements parallel plug-ins stop forking.
pub const DEFAULT_FORK_CUTOFF: usize = 16;

/// Display names used by [`register_defaults`], in registration order.
pub const DEFAULT_NAMES: [&str; 9] = [
    "Selection",
    "Insertion",
    "Bubble",
    "Merge",
    "Parallel Merge",
    "Quicksort",
    "Parallel Quicksort",
    "Randomized Parallel Quicksort",
    "Reference",
];

/// Register every reference plug-in, in [`DEFAULT_NAMES`] order.
pub fn register_defaults(registry: &mut AlgorithmRegistry) -> Result<(), RegistryError> {
    let [selection, insertion, bubble, merge, par_merge, quick, par_quick, rand_quick, reference] =
        DEFAULT_NAMES;
    registry.register(selection, SelectionSort)?;
    registry.register(insertion, InsertionSort)?;
    registry.register(bubble, BubbleSort)?;
    registry.register(merge, MergeSort)?;
    registry.register(par_merge, ParallelMergeSort::default())?;
    registry.register(quick, QuickSort)?;
    registry.register(par_quick, ParallelQuickSort::default())?;
    registry.register(rand_quick, RandomizedParallelQuickSort::default())?;
    registry.register(reference, ReferenceSort)?;
    Ok(())
}
