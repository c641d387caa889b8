//! Per-run results and performance counters.
//!
//! [`RunReport`] is what a finished run hands back to the animator: one
//! [`LaneReport`] per lane plus the [`RunMetrics`] collected while it ran.

use sortvis_core::{AlgorithmId, LaneId, RunId};

/// Counters collected during one run.
///
/// Durations are in microseconds. Frame and comparison counts cover the
/// whole run, including the initial and settled frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Instrumented comparator calls across all lanes.
    pub comparisons: u64,
    /// Frames presented by the surface during the run.
    pub frames_painted: u64,
    /// Tasks registered across all lane ledgers, top-level ones included.
    pub tasks_spawned: u64,
    /// Highest simultaneously live task count seen in any single lane.
    pub peak_live_tasks: usize,
    /// Wall-clock time from launch to settle, in microseconds.
    pub elapsed_us: u64,
}

/// Outcome of one lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneReport {
    /// Position in the run queue.
    pub lane: LaneId,
    /// Registry id of the plug-in.
    pub algorithm: AlgorithmId,
    /// Display name of the plug-in.
    pub name: String,
    /// Elements in the lane.
    pub len: usize,
    /// Whether the lane ended non-decreasing.
    pub sorted: bool,
    /// Panic message if the plug-in failed.
    pub failure: Option<String>,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Which run this was.
    pub id: RunId,
    /// Lanes in run queue order.
    pub lanes: Vec<LaneReport>,
    /// Counters.
    pub metrics: RunMetrics,
}

impl RunReport {
    /// Report for a run with no lanes.
    pub fn empty(id: RunId) -> Self {
        Self {
            id,
            lanes: Vec::new(),
            metrics: RunMetrics::default(),
        }
    }

    /// Every lane finished without failure and ended sorted.
    pub fn is_clean(&self) -> bool {
        self.lanes.iter().all(|l| l.failure.is_none() && l.sorted)
    }

    /// Lanes whose plug-in panicked.
    pub fn failures(&self) -> impl Iterator<Item = &LaneReport> {
        self.lanes.iter().filter(|l| l.failure.is_some())
    }
}
