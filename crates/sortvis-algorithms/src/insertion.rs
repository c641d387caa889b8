//! Insertion sort by adjacent swaps.

use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

/// Sinks each element left by adjacent swaps until its predecessor may
/// precede it. Stable; `n - 1` comparisons on already sorted input.
#[derive(Clone, Copy, Debug, Default)]
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        for i in 1..lane.len() {
            let mut j = i;
            while j > 0 && !lane.compare(cmp, j - 1, j) {
                lane.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}
