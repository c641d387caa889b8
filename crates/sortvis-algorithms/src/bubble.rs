//! Bubble sort with early exit.

use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

/// Repeated adjacent-swap passes, each one shorter than the last; stops
/// after the first pass that makes no swap.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleSort;

impl SortAlgorithm for BubbleSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        let mut end = lane.len();
        while end > 1 {
            let mut swapped = false;
            for j in 1..end {
                if !lane.compare(cmp, j - 1, j) {
                    lane.swap(j - 1, j);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
            end -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_core::Dataset;
    use sortvis_test_utils::CountingComparator;

    #[test]
    fn single_pass_on_sorted_input() {
        let data = Dataset::sequential(30);
        let cmp = CountingComparator::new();
        data.run_task(|lane| BubbleSort.sort(lane, &cmp));
        assert_eq!(cmp.count(), 29);
    }

    #[test]
    fn sorts_with_duplicates() {
        let data = Dataset::from_values([3, 1, 3, 2, 1]);
        data.run_task(|lane| BubbleSort.sort(lane, &CountingComparator::new()));
        assert_eq!(data.values(), vec![1, 1, 2, 3, 3]);
    }
}
