//! Oracle plug-in backed by the standard library sort.

use std::cmp::Ordering;

use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

/// Sorts an index permutation with `slice::sort_by`, deriving every
/// ordering from the comparator, then writes the permuted elements back.
/// Used as the correctness oracle for the other plug-ins.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceSort;

impl SortAlgorithm for ReferenceSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        let mut order: Vec<usize> = (0..lane.len()).collect();
        order.sort_by(|&a, &b| {
            if !lane.compare(cmp, b, a) {
                Ordering::Less
            } else if !lane.compare(cmp, a, b) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        let snapshot = lane.elements();
        let permuted: Vec<_> = order.iter().map(|&i| snapshot[i]).collect();
        lane.write_from(0, &permuted);
    }
}
