//! Quicksort family.
//!
//! All three variants share one partition step: a stable three-way copy
//! partition around a pivot, laid out as `[less | pivot, equal | greater]`.
//! The pivot and its equals are final after partitioning, so recursion (or
//! forking) covers only the `less` and `greater` ranges and the pivot slot
//! belongs to neither child.
//!
//! The randomized variant draws its pivot from a ChaCha8 RNG seeded from
//! `seed ^ (lo << 32) ^ len` of the absolute range being partitioned, so a
//! given seed and input always produce the same sequence of comparisons.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sortvis_algorithm::SortAlgorithm;
use sortvis_core::{Comparator, LaneSlice};

use crate::DEFAULT_FORK_CUTOFF;

/// Sequential quicksort with a middle-element pivot.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuickSort;

impl SortAlgorithm for QuickSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        quicksort(lane, cmp, Pivot::Middle, None);
    }
}

/// Quicksort that partitions, then sorts both sides as concurrent child
/// tasks while they hold at least `cutoff` elements.
#[derive(Clone, Copy, Debug)]
pub struct ParallelQuickSort {
    cutoff: usize,
}

impl ParallelQuickSort {
    /// Fork whenever a range holds at least `cutoff` elements (minimum 2).
    pub fn with_cutoff(cutoff: usize) -> Self {
        Self {
            cutoff: cutoff.max(2),
        }
    }
}

impl Default for ParallelQuickSort {
    fn default() -> Self {
        Self::with_cutoff(DEFAULT_FORK_CUTOFF)
    }
}

impl SortAlgorithm for ParallelQuickSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        quicksort(lane, cmp, Pivot::Middle, Some(self.cutoff));
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

/// [`ParallelQuickSort`] with a reproducible random pivot.
#[derive(Clone, Copy, Debug)]
pub struct RandomizedParallelQuickSort {
    seed: u64,
    cutoff: usize,
}

impl RandomizedParallelQuickSort {
    /// Pivot choices derive from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cutoff: DEFAULT_FORK_CUTOFF,
        }
    }

    /// Fork whenever a range holds at least `cutoff` elements (minimum 2).
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff.max(2);
        self
    }
}

impl Default for RandomizedParallelQuickSort {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SortAlgorithm for RandomizedParallelQuickSort {
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        quicksort(lane, cmp, Pivot::Seeded(self.seed), Some(self.cutoff));
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug)]
enum Pivot {
    Middle,
    Seeded(u64),
}

impl Pivot {
    fn pick(self, lane: &LaneSlice<'_>) -> usize {
        match self {
            Self::Middle => lane.len() / 2,
            Self::Seeded(seed) => {
                let range = lane.range();
                let mut rng = ChaCha8Rng::seed_from_u64(
                    seed ^ ((range.start as u64) << 32) ^ range.len() as u64,
                );
                rng.random_range(0..lane.len())
            }
        }
    }
}

fn quicksort(lane: &mut LaneSlice<'_>, cmp: &dyn Comparator, pivot: Pivot, fork_at: Option<usize>) {
    let n = lane.len();
    if n < 2 {
        return;
    }
    let (less_end, greater_start) = partition(lane, cmp, pivot.pick(lane));
    match fork_at {
        Some(cutoff) if n >= cutoff => lane.fork_join(
            0..less_end,
            greater_start..n,
            |mut less| quicksort(&mut less, cmp, pivot, fork_at),
            |mut greater| quicksort(&mut greater, cmp, pivot, fork_at),
        ),
        _ => {
            quicksort(&mut lane.subrange(0..less_end), cmp, pivot, fork_at);
            quicksort(&mut lane.subrange(greater_start..n), cmp, pivot, fork_at);
        }
    }
}

/// Partition around view index `p`. Returns `(less_end, greater_start)`.
fn partition(lane: &mut LaneSlice<'_>, cmp: &dyn Comparator, p: usize) -> (usize, usize) {
    let n = lane.len();
    let mut less = Vec::with_capacity(n);
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for i in (0..n).filter(|&i| i != p) {
        if !lane.compare(cmp, p, i) {
            less.push(lane.get(i));
        } else if !lane.compare(cmp, i, p) {
            greater.push(lane.get(i));
        } else {
            equal.push(lane.get(i));
        }
    }
    let less_end = less.len();
    let greater_start = less_end + 1 + equal.len();
    less.push(lane.get(p));
    less.append(&mut equal);
    less.append(&mut greater);
    lane.write_from(0, &less);
    (less_end, greater_start)
}
