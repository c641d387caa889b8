//! Top-down merge sort, sequential and forking.

use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

use crate::DEFAULT_FORK_CUTOFF;

/// Sequential top-down merge sort. Stable.
#[derive(Clone, Copy, Debug, Default)]
pub struct MergeSort;

impl SortAlgorithm for MergeSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        merge_sort(lane, cmp, None);
    }
}

/// Merge sort that sorts both halves as concurrent child tasks until the
/// halves shrink below the cutoff.
#[derive(Clone, Copy, Debug)]
pub struct ParallelMergeSort {
    cutoff: usize,
}

impl ParallelMergeSort {
    /// Fork whenever a range holds at least `cutoff` elements (minimum 2).
    pub fn with_cutoff(cutoff: usize) -> Self {
        Self {
            cutoff: cutoff.max(2),
        }
    }
}

impl Default for ParallelMergeSort {
    fn default() -> Self {
        Self::with_cutoff(DEFAULT_FORK_CUTOFF)
    }
}

impl SortAlgorithm for ParallelMergeSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        merge_sort(lane, cmp, Some(self.cutoff));
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

fn merge_sort(lane: &mut LaneSlice<'_>, cmp: &dyn Comparator, fork_at: Option<usize>) {
    let n = lane.len();
    if n < 2 {
        return;
    }
    let mid = n / 2;
    match fork_at {
        Some(cutoff) if n >= cutoff => lane.fork_join(
            0..mid,
            mid..n,
            |mut left| merge_sort(&mut left, cmp, fork_at),
            |mut right| merge_sort(&mut right, cmp, fork_at),
        ),
        _ => {
            merge_sort(&mut lane.subrange(0..mid), cmp, fork_at);
            merge_sort(&mut lane.subrange(mid..n), cmp, fork_at);
        }
    }
    merge(lane, mid, cmp);
}

/// Merge the sorted runs `[0, mid)` and `[mid, n)`.
///
/// Comparisons happen on the slots in place; the merged order is
/// collected into a scratch buffer and written back in one pass.
fn merge(lane: &mut LaneSlice<'_>, mid: usize, cmp: &dyn Comparator) {
    let n = lane.len();
    let mut out = Vec::with_capacity(n);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < n {
        if lane.compare(cmp, i, j) {
            out.push(lane.get(i));
            i += 1;
        } else {
            out.push(lane.get(j));
            j += 1;
        }
    }
    out.extend((i..mid).map(|k| lane.get(k)));
    out.extend((j..n).map(|k| lane.get(k)));
    lane.write_from(0, &out);
}
