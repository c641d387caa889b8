//! Run execution: one scoped thread per lane, joined before the settled
//! frame is painted.
//!
//! ```text
//!   Animator                 run thread                 lane threads
//!     |--launch(plan)-------->|                           |
//!     |   [bounded(1)]        |--spawn_scoped per lane--->| run_task(sort)
//!     |                       |<--join all----------------|
//!     |                       | settle()                  |
//!     |<--RunReport-----------|                           |
//! ```
//!
//! A plug-in panic is caught at the lane thread's join and reported in
//! that lane's [`LaneReport`]; the other lanes and the run are unaffected.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, TryRecvError};
use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{AlgorithmId, Dataset, LaneId, RunError, RunId};

use crate::instrument::InstrumentedComparator;
use crate::metrics::{LaneReport, RunMetrics, RunReport};
use crate::surface::Repaint;

const RUN_THREAD_NAME: &str = "sortvis-run";

/// One lane of a run: a plug-in and the dataset it sorts.
#[derive(Clone)]
pub struct PlannedLane {
    /// Registry id of the plug-in.
    pub algorithm: AlgorithmId,
    /// Display name of the plug-in.
    pub name: String,
    /// The plug-in.
    pub sorter: Arc<dyn SortAlgorithm>,
    /// The lane's dataset, also bound to the surface.
    pub dataset: Arc<Dataset>,
}

impl fmt::Debug for PlannedLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedLane")
            .field("algorithm", &self.algorithm)
            .field("name", &self.name)
            .field("len", &self.dataset.len())
            .finish()
    }
}

/// Everything needed to execute one run.
#[derive(Clone, Debug)]
pub struct RunPlan {
    /// Run identifier, echoed in the report.
    pub id: RunId,
    /// Lanes in run queue order.
    pub lanes: Vec<PlannedLane>,
}

/// Executes run plans against a shared surface.
#[derive(Clone)]
pub struct Orchestrator {
    repaint: Arc<dyn Repaint>,
    highlight_ticks: u8,
}

impl Orchestrator {
    /// Orchestrator painting through `repaint`, highlighting compared
    /// elements for `highlight_ticks` frames.
    pub fn new(repaint: Arc<dyn Repaint>, highlight_ticks: u8) -> Self {
        Self {
            repaint,
            highlight_ticks,
        }
    }

    /// Start `plan` on a background run thread.
    pub fn launch(&self, plan: RunPlan) -> Result<RunHandle, RunError> {
        let (report_tx, report_rx) = crossbeam_channel::bounded(1);
        let id = plan.id;
        let this = self.clone();
        let thread = thread::Builder::new()
            .name(RUN_THREAD_NAME.into())
            .spawn(move || {
                let report = this.run_blocking(plan);
                // The animator may have been dropped mid-run.
                let _ = report_tx.send(report);
            })?;
        Ok(RunHandle {
            id,
            report_rx,
            thread: Some(thread),
        })
    }

    /// Execute `plan` on the calling thread and return its report.
    ///
    /// Every lane runs concurrently on its own thread. Returns after all
    /// lanes have finished and the settled frame has been presented.
    pub fn run_blocking(&self, plan: RunPlan) -> RunReport {
        let started = Instant::now();
        let frames_before = self.repaint.frames_painted();
        let cmp = InstrumentedComparator::new(Arc::clone(&self.repaint), self.highlight_ticks);
        tracing::info!(run = %plan.id, lanes = plan.lanes.len(), "run started");

        for lane in &plan.lanes {
            lane.dataset.ledger().reset_stats();
        }

        let outcomes: Vec<Option<String>> = thread::scope(|scope| {
            let handles: Vec<_> = plan
                .lanes
                .iter()
                .enumerate()
                .map(|(i, lane)| {
                    let cmp = &cmp;
                    thread::Builder::new()
                        .name(format!("sortvis-lane-{i}"))
                        .spawn_scoped(scope, move || {
                            lane.dataset
                                .run_task(|slice| lane.sorter.sort(slice, cmp));
                        })
                })
                .collect();
            handles
                .into_iter()
                .map(|spawned| match spawned {
                    Ok(handle) => handle.join().err().map(panic_message),
                    Err(e) => Some(format!("failed to spawn lane thread: {e}")),
                })
                .collect()
        });

        self.repaint.settle();

        let lanes: Vec<LaneReport> = plan
            .lanes
            .iter()
            .zip(outcomes)
            .enumerate()
            .map(|(i, (lane, failure))| {
                if let Some(reason) = &failure {
                    tracing::error!(
                        run = %plan.id,
                        lane = i,
                        algorithm = %lane.name,
                        reason = %reason,
                        "sorting plug-in failed"
                    );
                }
                LaneReport {
                    lane: LaneId(i),
                    algorithm: lane.algorithm,
                    name: lane.name.clone(),
                    len: lane.dataset.len(),
                    sorted: lane.dataset.is_sorted(),
                    failure,
                }
            })
            .collect();

        let metrics = RunMetrics {
            comparisons: cmp.comparisons(),
            frames_painted: self
                .repaint
                .frames_painted()
                .saturating_sub(frames_before),
            tasks_spawned: plan
                .lanes
                .iter()
                .map(|l| l.dataset.ledger().spawned())
                .sum(),
            peak_live_tasks: plan
                .lanes
                .iter()
                .map(|l| l.dataset.ledger().peak_live())
                .max()
                .unwrap_or(0),
            elapsed_us: started.elapsed().as_micros() as u64,
        };
        let report = RunReport {
            id: plan.id,
            lanes,
            metrics,
        };
        tracing::info!(
            run = %report.id,
            comparisons = report.metrics.comparisons,
            frames = report.metrics.frames_painted,
            tasks = report.metrics.tasks_spawned,
            elapsed_us = report.metrics.elapsed_us,
            clean = report.is_clean(),
            "run finished"
        );
        report
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("highlight_ticks", &self.highlight_ticks)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "plug-in panicked".to_string()
    }
}

/// A run in progress on the background run thread.
#[derive(Debug)]
pub struct RunHandle {
    id: RunId,
    report_rx: Receiver<RunReport>,
    thread: Option<JoinHandle<()>>,
}

impl RunHandle {
    /// The run being executed.
    pub fn id(&self) -> RunId {
        self.id
    }

    /// The report if the run has finished, without blocking.
    pub fn try_finish(&mut self) -> Option<Result<RunReport, RunError>> {
        match self.report_rx.try_recv() {
            Ok(report) => {
                self.reap();
                Some(Ok(report))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.reap();
                Some(Err(RunError::RunThreadLost))
            }
        }
    }

    /// Block until the run finishes.
    pub fn wait(mut self) -> Result<RunReport, RunError> {
        let result = self.report_rx.recv().map_err(|_| RunError::RunThreadLost);
        self.reap();
        result
    }

    fn reap(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
