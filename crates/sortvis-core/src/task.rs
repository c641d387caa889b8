//! Live-task bookkeeping for one dataset.
//!
//! Every task that may touch a dataset registers its absolute `[lo, hi)`
//! range here for as long as it runs. Two live tasks never overlap; a
//! registration that would overlap is an invariant violation and panics.

use std::fmt;
use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct LedgerState {
    live: Vec<Range<usize>>,
    spawned: u64,
    peak: usize,
}

/// Tracks the live task ranges of one dataset.
#[derive(Default)]
pub struct TaskLedger {
    state: Mutex<LedgerState>,
}

impl TaskLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `range` as a live task until the returned guard drops.
    ///
    /// Empty ranges own nothing and are not recorded.
    ///
    /// # Panics
    ///
    /// Panics if `range` overlaps a range that is already live.
    pub fn enter(&self, range: Range<usize>) -> TaskGuard<'_> {
        if range.is_empty() {
            return TaskGuard {
                ledger: self,
                range: None,
            };
        }
        let conflict = {
            let mut state = self.lock();
            let conflict = state
                .live
                .iter()
                .find(|live| overlaps(live, &range))
                .cloned();
            if conflict.is_none() {
                state.live.push(range.clone());
                state.spawned += 1;
                state.peak = state.peak.max(state.live.len());
            }
            conflict
        };
        if let Some(live) = conflict {
            panic!(
                "task range {}..{} overlaps live task {}..{}",
                range.start, range.end, live.start, live.end
            );
        }
        TaskGuard {
            ledger: self,
            range: Some(range),
        }
    }

    /// Take a parent out of the live set while its children run.
    pub(crate) fn suspend(&self, range: &Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.remove(range);
    }

    /// Put a suspended parent back after its children have joined.
    pub(crate) fn resume(&self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let mut state = self.lock();
        state.live.push(range);
        state.peak = state.peak.max(state.live.len());
    }

    /// Total tasks registered since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn spawned(&self) -> u64 {
        self.lock().spawned
    }

    /// Highest number of simultaneously live tasks observed.
    pub fn peak_live(&self) -> usize {
        self.lock().peak
    }

    /// Tasks live right now.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Zero the counters. Live registrations are kept.
    pub fn reset_stats(&self) {
        let mut state = self.lock();
        state.spawned = 0;
        state.peak = state.live.len();
    }

    fn remove(&self, range: &Range<usize>) {
        let mut state = self.lock();
        if let Some(pos) = state.live.iter().position(|live| live == range) {
            state.live.swap_remove(pos);
        }
    }

    // A task that panicked while holding the lock leaves the list intact.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TaskLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TaskLedger")
            .field("live", &state.live)
            .field("spawned", &state.spawned)
            .field("peak", &state.peak)
            .finish()
    }
}

/// Registration handle returned by [`TaskLedger::enter`].
///
/// Dropping it (including during unwinding) removes the range.
#[must_use = "the task leaves the ledger when the guard drops"]
pub struct TaskGuard<'a> {
    ledger: &'a TaskLedger,
    range: Option<Range<usize>>,
}

impl TaskGuard<'_> {
    /// The registered range, `None` for an empty task.
    pub fn range(&self) -> Option<&Range<usize>> {
        self.range.as_ref()
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        if let Some(range) = self.range.take() {
            self.ledger.remove(&range);
        }
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_ranges_coexist() {
        let ledger = TaskLedger::new();
        let a = ledger.enter(0..5);
        let b = ledger.enter(5..10);
        assert_eq!(ledger.live_count(), 2);
        assert_eq!(ledger.peak_live(), 2);
        drop(a);
        drop(b);
        assert_eq!(ledger.live_count(), 0);
        assert_eq!(ledger.spawned(), 2);
    }

    #[test]
    #[should_panic(expected = "overlaps live task 0..5")]
    fn overlapping_range_panics() {
        let ledger = TaskLedger::new();
        let _a = ledger.enter(0..5);
        let _b = ledger.enter(4..8);
    }

    #[test]
    fn empty_range_is_not_recorded() {
        let ledger = TaskLedger::new();
        let _a = ledger.enter(0..5);
        let g = ledger.enter(3..3);
        assert!(g.range().is_none());
        assert_eq!(ledger.live_count(), 1);
        assert_eq!(ledger.spawned(), 1);
    }

    #[test]
    fn guard_leaves_on_unwind() {
        let ledger = TaskLedger::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g = ledger.enter(0..4);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(ledger.live_count(), 0);
        let _again = ledger.enter(0..4);
    }

    #[test]
    fn suspended_parent_admits_children() {
        let ledger = TaskLedger::new();
        let parent = ledger.enter(0..10);
        ledger.suspend(&(0..10));
        {
            let _l = ledger.enter(0..5);
            let _r = ledger.enter(6..10);
            assert_eq!(ledger.live_count(), 2);
        }
        ledger.resume(0..10);
        assert_eq!(ledger.live_count(), 1);
        drop(parent);
        assert_eq!(ledger.live_count(), 0);
        assert_eq!(ledger.spawned(), 3);
    }

    #[test]
    fn reset_stats_keeps_live_ranges() {
        let ledger = TaskLedger::new();
        let _a = ledger.enter(0..3);
        drop(ledger.enter(3..6));
        ledger.reset_stats();
        assert_eq!(ledger.spawned(), 0);
        assert_eq!(ledger.peak_live(), 1);
        assert_eq!(ledger.live_count(), 1);
    }
}
