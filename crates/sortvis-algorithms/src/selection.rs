//! Selection sort.

use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

/// Scans for the minimum of the unsorted suffix and swaps it into place.
/// Exactly `n * (n - 1) / 2` comparisons regardless of input.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionSort;

impl SortAlgorithm for SelectionSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        let n = lane.len();
        for i in 0..n {
            let mut min = i;
            for j in i + 1..n {
                if !lane.compare(cmp, min, j) {
                    min = j;
                }
            }
            lane.swap(i, min);
        }
    }
}
