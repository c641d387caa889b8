//! [`LaneSlice`]: the range-checked view a plug-in sorts through.
//!
//! A view covers `[lo, hi)` of one dataset and belongs to exactly one live
//! task. Indices are relative to the view; touching anything outside it
//! panics with the absolute range in the message. Parallel plug-ins split
//! their view with [`LaneSlice::fork_join`], which is the only way child
//! tasks come into existence.

use std::fmt;
use std::io;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, Scope, ScopedJoinHandle};

use crate::compare::Comparator;
use crate::element::{Element, Slot};
use crate::task::TaskLedger;

const TASK_THREAD_NAME: &str = "sortvis-task";

/// Mutable window onto a contiguous range of a dataset.
pub struct LaneSlice<'a> {
    slots: &'a [Slot],
    offset: usize,
    task: Range<usize>,
    ledger: &'a TaskLedger,
}

impl<'a> LaneSlice<'a> {
    pub(crate) fn new(
        slots: &'a [Slot],
        offset: usize,
        task: Range<usize>,
        ledger: &'a TaskLedger,
    ) -> Self {
        Self {
            slots,
            offset,
            task,
            ledger,
        }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Absolute `[lo, hi)` of the view within its dataset.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.slots.len()
    }

    /// Element at view index `i`.
    #[track_caller]
    pub fn get(&self, i: usize) -> Element {
        self.slot(i).load()
    }

    /// Overwrite the value at view index `i`. The highlight of the
    /// position is kept; `element.highlight` is ignored.
    #[track_caller]
    pub fn set(&mut self, i: usize, element: Element) {
        self.slot(i).store_value(element.value);
    }

    /// Exchange the values of two positions. Highlights stay where they are.
    #[track_caller]
    pub fn swap(&mut self, i: usize, j: usize) {
        let a = self.slot(i);
        let b = self.slot(j);
        if i == j {
            return;
        }
        let held = a.load().value;
        a.store_value(b.load().value);
        b.store_value(held);
    }

    /// Snapshot of every element in the view.
    pub fn elements(&self) -> Vec<Element> {
        self.slots.iter().map(Slot::load).collect()
    }

    /// Copy the values of `src` into the view starting at index `start`.
    /// Highlights of the overwritten positions are kept.
    #[track_caller]
    pub fn write_from(&mut self, start: usize, src: &[Element]) {
        self.check_range(&(start..start + src.len()));
        for (slot, e) in self.slots[start..].iter().zip(src) {
            slot.store_value(e.value);
        }
    }

    /// Ask `cmp` whether element `i` may precede element `j`.
    #[track_caller]
    pub fn compare(&self, cmp: &dyn Comparator, i: usize, j: usize) -> bool {
        cmp.compare(self.slot(i), self.slot(j))
    }

    /// Narrower view over `range` (relative to this view) inside the same
    /// task. Used for sequential recursion.
    #[track_caller]
    pub fn subrange(&mut self, range: Range<usize>) -> LaneSlice<'_> {
        self.check_range(&range);
        LaneSlice {
            slots: &self.slots[range.clone()],
            offset: self.offset + range.start,
            task: self.task.clone(),
            ledger: self.ledger,
        }
    }

    /// Run two child tasks over disjoint sub-ranges and wait for both.
    ///
    /// `run_left` executes on a new scoped thread and `run_right` on the
    /// calling one. If no thread can be spawned, `run_left` runs on the
    /// calling thread after `run_right`. The current task is suspended for
    /// the duration of the fork, so only the children count as live. If
    /// either child panics the panic is re-raised here, after both have
    /// finished.
    ///
    /// # Panics
    ///
    /// Panics if either range leaves the view or the ranges overlap.
    #[track_caller]
    pub fn fork_join<L, R>(
        &mut self,
        left: Range<usize>,
        right: Range<usize>,
        run_left: L,
        run_right: R,
    ) where
        L: FnOnce(LaneSlice<'_>) + Send,
        R: FnOnce(LaneSlice<'_>) + Send,
    {
        self.check_range(&left);
        self.check_range(&right);
        let left_abs = self.absolute(&left);
        let right_abs = self.absolute(&right);
        assert!(
            left.is_empty() || right.is_empty() || left.end <= right.start || right.end <= left.start,
            "fork ranges {}..{} and {}..{} overlap",
            left_abs.start,
            left_abs.end,
            right_abs.start,
            right_abs.end
        );

        let ledger = self.ledger;
        let left_slots = &self.slots[left];
        let right_slots = &self.slots[right];

        let left_job = Mutex::new(Some(move || {
            let _task = ledger.enter(left_abs.clone());
            run_left(LaneSlice::new(left_slots, left_abs.start, left_abs, ledger));
        }));

        ledger.suspend(&self.task);
        let (left_result, right_result) = thread::scope(|scope| {
            let spawned = spawn_task(scope, || run_pending(&left_job));
            let right_result = panic::catch_unwind(AssertUnwindSafe(move || {
                let _task = ledger.enter(right_abs.clone());
                run_right(LaneSlice::new(
                    right_slots,
                    right_abs.start,
                    right_abs,
                    ledger,
                ));
            }));
            let left_result = match spawned {
                Ok(handle) => handle.join(),
                Err(_) => panic::catch_unwind(AssertUnwindSafe(|| run_pending(&left_job))),
            };
            (left_result, right_result)
        });
        ledger.resume(self.task.clone());

        if let Err(payload) = left_result.and(right_result) {
            panic::resume_unwind(payload);
        }
    }

    fn absolute(&self, range: &Range<usize>) -> Range<usize> {
        self.offset + range.start..self.offset + range.end
    }

    #[track_caller]
    fn slot(&self, i: usize) -> &'a Slot {
        match self.slots.get(i) {
            Some(slot) => slot,
            None => panic!(
                "index {} (absolute {}) outside lane view {}..{}",
                i,
                self.offset + i,
                self.offset,
                self.offset + self.slots.len()
            ),
        }
    }

    #[track_caller]
    fn check_range(&self, range: &Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.slots.len(),
            "range {}..{} (absolute {}..{}) outside lane view {}..{}",
            range.start,
            range.end,
            self.offset + range.start,
            self.offset + range.end,
            self.offset,
            self.offset + self.slots.len()
        );
    }
}

fn spawn_task<'scope, 'env, F>(
    scope: &'scope Scope<'scope, 'env>,
    f: F,
) -> io::Result<ScopedJoinHandle<'scope, ()>>
where
    F: FnOnce() + Send + 'scope,
{
    #[cfg(test)]
    if tests::SPAWN_REFUSED.with(std::cell::Cell::get) {
        return Err(io::Error::other("task threads refused"));
    }
    thread::Builder::new()
        .name(TASK_THREAD_NAME.into())
        .spawn_scoped(scope, f)
}

/// Run the queued job unless another thread already took it.
fn run_pending<F: FnOnce()>(job: &Mutex<Option<F>>) {
    let job = job.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(job) = job {
        job();
    }
}

impl fmt::Debug for LaneSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaneSlice")
            .field("range", &self.range())
            .field("task", &self.task)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Barrier;

    use crate::compare::NaturalOrder;
    use crate::dataset::Dataset;
    use crate::element::Element;

    thread_local! {
        pub(super) static SPAWN_REFUSED: Cell<bool> = const { Cell::new(false) };
    }

    fn values(lane: &super::LaneSlice<'_>) -> Vec<u32> {
        lane.elements().iter().map(|e| e.value).collect()
    }

    #[test]
    fn get_set_swap() {
        let data = Dataset::from_values([3, 1, 2]);
        data.run_task(|lane| {
            lane.swap(0, 1);
            lane.set(2, Element::new(9));
            assert_eq!(values(lane), vec![1, 3, 9]);
            assert_eq!(lane.get(1).value, 3);
        });
    }

    #[test]
    #[should_panic(expected = "outside lane view 0..3")]
    fn out_of_range_get_panics() {
        let data = Dataset::from_values([3, 1, 2]);
        data.run_task(|lane| {
            lane.get(3);
        });
    }

    #[test]
    fn subrange_offsets_are_absolute() {
        let data = Dataset::from_values([5, 4, 3, 2, 1]);
        data.run_task(|lane| {
            let mut inner = lane.subrange(1..4);
            assert_eq!(inner.range(), 1..4);
            assert_eq!(inner.len(), 3);
            inner.swap(0, 2);
        });
        assert_eq!(data.values(), vec![5, 2, 3, 4, 1]);
    }

    #[test]
    #[should_panic(expected = "outside lane view 1..4")]
    fn subrange_cannot_reach_outside() {
        let data = Dataset::from_values([5, 4, 3, 2, 1]);
        data.run_task(|lane| {
            let inner = lane.subrange(1..4);
            inner.get(3);
        });
    }

    #[test]
    fn compare_uses_view_indices() {
        let data = Dataset::from_values([1, 9, 4]);
        data.run_task(|lane| {
            let mut inner = lane.subrange(1..3);
            assert!(!inner.compare(&NaturalOrder, 0, 1));
            inner.write_from(0, &[Element::new(2), Element::new(3)]);
        });
        assert_eq!(data.values(), vec![1, 2, 3]);
    }

    #[test]
    fn writes_keep_position_highlights() {
        let data = Dataset::from_values([3, 1, 2]);
        data.slots()[0].mark(4);
        data.run_task(|lane| {
            let stale = lane.elements();
            lane.swap(0, 1);
            data.slots()[0].decay();
            lane.write_from(0, &stale);
            lane.set(2, Element { value: 7, highlight: 9 });
        });
        let highlights: Vec<u8> = data.elements().iter().map(|e| e.highlight).collect();
        assert_eq!(data.values(), vec![3, 1, 7]);
        assert_eq!(highlights, vec![3, 0, 0]);
    }

    #[test]
    fn fork_join_runs_both_children() {
        let data = Dataset::from_values([4, 3, 2, 1, 8, 7, 6, 5]);
        // Neither child returns before both are registered.
        let both_live = Barrier::new(2);
        data.run_task(|lane| {
            lane.fork_join(
                0..4,
                4..8,
                |mut l| {
                    both_live.wait();
                    assert_eq!(l.range(), 0..4);
                    l.swap(0, 3);
                },
                |mut r| {
                    both_live.wait();
                    assert_eq!(r.range(), 4..8);
                    r.swap(0, 3);
                },
            );
        });
        assert_eq!(data.values(), vec![1, 3, 2, 4, 5, 7, 6, 8]);
        assert_eq!(data.ledger().spawned(), 3);
        assert_eq!(data.ledger().peak_live(), 2);
        assert_eq!(data.ledger().live_count(), 0);
    }

    #[test]
    fn fork_join_reraises_child_panic_after_join() {
        let data = Dataset::from_values([1, 2, 3, 4]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            data.run_task(|lane| {
                lane.fork_join(
                    0..2,
                    2..4,
                    |_| panic!("left child failed"),
                    |mut r| r.swap(0, 1),
                );
            });
        }));
        assert!(result.is_err());
        assert_eq!(data.values(), vec![1, 2, 4, 3]);
        assert_eq!(data.ledger().live_count(), 0);
    }

    #[test]
    fn refused_spawn_runs_left_child_inline() {
        let data = Dataset::from_values([2, 1, 4, 3]);
        let caller = std::thread::current().id();
        SPAWN_REFUSED.with(|r| r.set(true));
        data.run_task(|lane| {
            lane.fork_join(
                0..2,
                2..4,
                |mut l| {
                    assert_eq!(std::thread::current().id(), caller);
                    l.swap(0, 1);
                },
                |mut r| r.swap(0, 1),
            );
        });
        SPAWN_REFUSED.with(|r| r.set(false));
        assert_eq!(data.values(), vec![1, 2, 3, 4]);
        assert_eq!(data.ledger().spawned(), 3);
        assert_eq!(data.ledger().live_count(), 0);
    }

    #[test]
    #[should_panic(expected = "fork ranges 0..3 and 2..4 overlap")]
    fn overlapping_fork_panics() {
        let data = Dataset::from_values([1, 2, 3, 4]);
        data.run_task(|lane| lane.fork_join(0..3, 2..4, |_| {}, |_| {}));
    }

    #[test]
    fn nested_fork_from_subrange() {
        let data = Dataset::from_values([2, 1, 4, 3, 6, 5]);
        data.run_task(|lane| {
            let mut inner = lane.subrange(0..4);
            inner.fork_join(0..2, 2..4, |mut l| l.swap(0, 1), |mut r| r.swap(0, 1));
        });
        assert_eq!(data.values(), vec![1, 2, 3, 4, 6, 5]);
    }
}
