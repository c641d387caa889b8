//! Misbehaving plug-ins and value helpers.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

/// Plug-in that reads one element past the end of its view.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverreachingSort;

impl SortAlgorithm for OverreachingSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, _cmp: &dyn Comparator) {
        let n = lane.len();
        lane.get(n);
    }
}

/// Plug-in that compares once, then panics.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanickingSort;

pub const PANIC_MESSAGE: &str = "deliberate plug-in failure";

impl SortAlgorithm for PanickingSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        if lane.len() >= 2 {
            lane.compare(cmp, 0, 1);
        }
        panic!("{PANIC_MESSAGE}");
    }
}

/// Deterministic shuffled permutation of `1..=n`.
pub fn shuffled_values(n: u32, seed: u64) -> Vec<u32> {
    let mut values: Vec<u32> = (1..=n).collect();
    values.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    values
}

/// Assert `output` is non-decreasing and a permutation of `input`.
#[track_caller]
pub fn assert_sorted_permutation(input: &[u32], output: &[u32]) {
    assert!(
        output.windows(2).all(|w| w[0] <= w[1]),
        "output is not sorted: {output:?}"
    );
    let mut expected = input.to_vec();
    expected.sort_unstable();
    assert_eq!(output, expected.as_slice(), "output is not a permutation of input");
}
