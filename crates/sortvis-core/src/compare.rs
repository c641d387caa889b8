//! The comparator seam between plug-ins and the engine.

use crate::element::Slot;

/// Ordering predicate handed to every sorting plug-in.
///
/// `compare(x, y)` returns `true` when `x` may precede `y`
/// (`x.value <= y.value` for the natural order). Implementations receive
/// the storage slots rather than copies so that instrumented comparators
/// can mark the compared elements in place.
///
/// Comparators are shared by every task of a run, hence `Sync`.
pub trait Comparator: Sync {
    /// `true` if the element in `x` may precede the element in `y`.
    fn compare(&self, x: &Slot, y: &Slot) -> bool;
}

/// Plain `<=` on element values, with no side effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl Comparator for NaturalOrder {
    fn compare(&self, x: &Slot, y: &Slot) -> bool {
        x.load().value <= y.load().value
    }
}

impl<C: Comparator + ?Sized> Comparator for &C {
    fn compare(&self, x: &Slot, y: &Slot) -> bool {
        (**self).compare(x, y)
    }
}
