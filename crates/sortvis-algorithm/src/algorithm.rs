//! The [`SortAlgorithm`] trait and the closure adapter [`from_fn`].

use std::fmt;

use sortvis_core::{Comparator, LaneSlice};

/// An in-place sorting procedure driven by an external comparator.
///
/// # Contract
///
/// - On return, the lane is sorted non-decreasingly with respect to `cmp`
///   and is a permutation of its input.
/// - Every ordering decision goes through `cmp` (via
///   [`LaneSlice::compare`]); the engine instruments the comparator to
///   animate the run.
/// - The plug-in touches only its own view. Parallel plug-ins split work
///   with [`LaneSlice::fork_join`] and never access a range owned by a
///   sibling task.
/// - `&self`: plug-ins are stateless; one instance may sort many lanes at
///   once.
///
/// # Examples
///
/// ```
/// use sortvis_algorithm::SortAlgorithm;
/// use sortvis_core::{Comparator, Dataset, LaneSlice, NaturalOrder};
///
/// struct Exchange;
///
/// impl SortAlgorithm for Exchange {
///     fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
///         for i in 0..lane.len() {
///             for j in i + 1..lane.len() {
///                 if !lane.compare(cmp, i, j) {
///                     lane.swap(i, j);
///                 }
///             }
///         }
///     }
/// }
///
/// let data = Dataset::from_values([3, 1, 2]);
/// data.run_task(|lane| Exchange.sort(lane, &NaturalOrder));
/// assert_eq!(data.values(), vec![1, 2, 3]);
/// ```
pub trait SortAlgorithm: Send + Sync + 'static {
    /// Sort `lane` in place.
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator);

    /// Whether the plug-in forks child tasks. Informational only.
    fn is_parallel(&self) -> bool {
        false
    }
}

/// A [`SortAlgorithm`] backed by a closure. Built by [`from_fn`].
pub struct FnAlgorithm<F> {
    f: F,
}

impl<F> SortAlgorithm for FnAlgorithm<F>
where
    F: Fn(&mut LaneSlice<'_>, &dyn Comparator) + Send + Sync + 'static,
{
    fn sort(&self, lane: &mut LaneSlice<'_>, cmp: &dyn Comparator) {
        (self.f)(lane, cmp)
    }
}

impl<F> fmt::Debug for FnAlgorithm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAlgorithm")
    }
}

/// Wrap a closure as a sequential [`SortAlgorithm`].
pub fn from_fn<F>(f: F) -> FnAlgorithm<F>
where
    F: Fn(&mut LaneSlice<'_>, &dyn Comparator) + Send + Sync + 'static,
{
    FnAlgorithm { f }
}
