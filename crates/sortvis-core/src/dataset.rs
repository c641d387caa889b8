//! [`Dataset`]: one lane's sequence of elements.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::element::{Element, Slot};
use crate::lane::LaneSlice;
use crate::task::TaskLedger;

/// Fixed-length sequence of elements sorted by one plug-in.
///
/// The storage is a boxed slice of atomic slots, so the painter can read a
/// dataset while its task rewrites it. Mutation by plug-ins goes through
/// [`Dataset::run_task`], which registers the whole range as a top-level
/// task in the dataset's [`TaskLedger`].
pub struct Dataset {
    slots: Box<[Slot]>,
    ledger: TaskLedger,
}

impl Dataset {
    /// A dataset holding `values` in order, none highlighted.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            slots: values
                .into_iter()
                .map(|v| Slot::new(Element::new(v)))
                .collect(),
            ledger: TaskLedger::new(),
        }
    }

    /// The sorted sequence `1..=n`.
    pub fn sequential(n: u32) -> Self {
        Self::from_values(1..=n)
    }

    /// A uniformly shuffled permutation of `1..=n`.
    pub fn shuffled<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Self {
        let mut values: Vec<u32> = (1..=n).collect();
        values.shuffle(rng);
        Self::from_values(values)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the dataset has no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current values in order.
    pub fn values(&self) -> Vec<u32> {
        self.slots.iter().map(|s| s.load().value).collect()
    }

    /// Current elements in order, highlights included.
    pub fn elements(&self) -> Vec<Element> {
        self.slots.iter().map(Slot::load).collect()
    }

    /// Raw slots, for painters.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The ledger of tasks currently working on this dataset.
    pub fn ledger(&self) -> &TaskLedger {
        &self.ledger
    }

    /// Whether values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values().windows(2).all(|w| w[0] <= w[1])
    }

    /// Overwrite every element with `values`, clearing highlights.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn reseed_from(&self, values: &[u32]) {
        assert_eq!(
            values.len(),
            self.slots.len(),
            "reseed length {} does not match dataset length {}",
            values.len(),
            self.slots.len()
        );
        for (slot, &v) in self.slots.iter().zip(values) {
            slot.store(Element::new(v));
        }
    }

    /// Clear every highlight.
    pub fn clear_highlights(&self) {
        for slot in self.slots.iter() {
            slot.clear_highlight();
        }
    }

    /// Run `f` as the top-level task over the whole dataset.
    ///
    /// # Panics
    ///
    /// Panics if another task is already live on an overlapping range.
    pub fn run_task<T>(&self, f: impl FnOnce(&mut LaneSlice<'_>) -> T) -> T {
        let range = 0..self.slots.len();
        let _task = self.ledger.enter(range.clone());
        let mut lane = LaneSlice::new(&self.slots, 0, range, &self.ledger);
        f(&mut lane)
    }
}

impl Clone for Dataset {
    /// Value-equal copy with its own, empty ledger.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.iter().map(|s| Slot::new(s.load())).collect(),
            ledger: TaskLedger::new(),
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("values", &self.values())
            .finish()
    }
}
