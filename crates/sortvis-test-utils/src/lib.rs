//! Test utilities and mock types for sortvis development.
//!
//! Provides a [`RecordingCanvas`] that captures what the shared surface
//! presents, a [`CountingComparator`] for comparison-count assertions, and
//! in [`fixtures`] deliberately misbehaving plug-ins and value helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    assert_sorted_permutation, shuffled_values, OverreachingSort, PanickingSort, PANIC_MESSAGE,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sortvis_core::{Comparator, Slot};
use sortvis_engine::surface::{Canvas, Frame, Geometry};

/// Frames kept in full by [`RecordingCanvas::new`].
pub const DEFAULT_HISTORY: usize = 64;

#[derive(Default)]
struct CanvasLog {
    resizes: Vec<Geometry>,
    history: Vec<Frame>,
    history_limit: usize,
    presented: usize,
    settled: usize,
    max_highlighted: usize,
    last: Option<Frame>,
}

/// Mock [`Canvas`] that records what it is shown.
///
/// Clones share one log, so a test can keep a handle while the surface owns
/// the canvas. Only the first `history_limit` frames are kept in full; the
/// rest are counted and summarized.
#[derive(Clone, Default)]
pub struct RecordingCanvas {
    log: Arc<Mutex<CanvasLog>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    pub fn with_history(limit: usize) -> Self {
        Self {
            log: Arc::new(Mutex::new(CanvasLog {
                history_limit: limit,
                ..CanvasLog::default()
            })),
        }
    }

    /// Every geometry passed to `resize`, in order.
    pub fn resizes(&self) -> Vec<Geometry> {
        self.lock().resizes.clone()
    }

    /// The most recent resize.
    pub fn geometry(&self) -> Option<Geometry> {
        self.lock().resizes.last().copied()
    }

    /// The first frames presented, up to the history limit.
    pub fn history(&self) -> Vec<Frame> {
        self.lock().history.clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().last.clone()
    }

    /// Total frames presented.
    pub fn presented(&self) -> usize {
        self.lock().presented
    }

    /// Frames presented with `settled == true`.
    pub fn settled_frames(&self) -> usize {
        self.lock().settled
    }

    /// Largest number of highlighted bars seen in any single frame.
    pub fn max_highlighted(&self) -> usize {
        self.lock().max_highlighted
    }

    fn lock(&self) -> MutexGuard<'_, CanvasLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, geometry: Geometry) {
        self.lock().resizes.push(geometry);
    }

    fn present(&mut self, frame: &Frame) {
        let mut log = self.lock();
        log.presented += 1;
        if frame.settled {
            log.settled += 1;
        }
        log.max_highlighted = log.max_highlighted.max(frame.highlighted_count());
        if log.history.len() < log.history_limit {
            log.history.push(frame.clone());
        }
        log.last = Some(frame.clone());
    }
}

/// Natural-order [`Comparator`] that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingComparator {
    calls: AtomicU64,
}

impl CountingComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Comparator for CountingComparator {
    fn compare(&self, x: &Slot, y: &Slot) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        x.load().value <= y.load().value
    }
}
