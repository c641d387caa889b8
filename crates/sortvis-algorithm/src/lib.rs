//! Sorting plug-in trait and algorithm registry for sortvis.
//!
//! The [`SortAlgorithm`] trait is the whole contract between the engine and
//! a sorting plug-in: sort the given [`LaneSlice`](sortvis_core::LaneSlice)
//! in place using only the supplied comparator. The [`AlgorithmRegistry`]
//! holds the registered plug-ins in display order along with their
//! selection state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod registry;

pub use algorithm::{from_fn, FnAlgorithm, SortAlgorithm};
pub use registry::{AlgorithmEntry, AlgorithmRegistry, RegistryError, RunQueue};
