//! Run orchestration, shared rendering surface and interaction state
//! machine for sortvis.
//!
//! The [`Animator`] is the top-level type: it owns the algorithm registry,
//! the configuration form and help view, and drives runs through the
//! [`Orchestrator`]. Every comparison made by a running plug-in goes
//! through the [`InstrumentedComparator`], which highlights the compared
//! elements and synchronously repaints the [`SharedSurface`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod instrument;
pub mod interaction;
pub mod metrics;
pub mod orchestrator;
pub mod surface;

pub use config::{AnimatorConfig, ConfigError, StartupError};
pub use instrument::InstrumentedComparator;
pub use interaction::{Animator, HelpDocument, HelpView, Input, Key, Mode, QuantityField};
pub use metrics::{LaneReport, RunMetrics, RunReport};
pub use orchestrator::{Orchestrator, PlannedLane, RunHandle, RunPlan};
pub use surface::{Bar, Canvas, Frame, Geometry, LaneBinding, LaneFrame, Repaint, SharedSurface};
