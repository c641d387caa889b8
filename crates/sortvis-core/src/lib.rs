//! Core types for the sortvis concurrent sorting animator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data every other crate agrees on: elements and their atomic storage
//! slots, datasets, the range-checked [`LaneSlice`] view handed to sorting
//! plug-ins, the per-dataset [`TaskLedger`], the [`Comparator`] trait, typed
//! identifiers and run errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod dataset;
pub mod element;
pub mod error;
pub mod id;
pub mod lane;
pub mod task;

pub use compare::{Comparator, NaturalOrder};
pub use dataset::Dataset;
pub use element::{Element, Slot};
pub use error::RunError;
pub use id::{AlgorithmId, LaneId, RunId};
pub use lane::LaneSlice;
pub use task::{TaskGuard, TaskLedger};
