//! [`Element`] values and the atomic [`Slot`] cells that store them.
//!
//! A dataset is read by the painting thread while its owning task is
//! reordering it, so each position is an `AtomicU64` packing the element's
//! value (high 32 bits) and highlight counter (low 8 bits).
//!
//! Highlights belong to positions. Plug-ins move values with
//! [`Slot::store_value`], which leaves the counter alone, so a stale copy of
//! an element can never bring back a highlight the painter already decayed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const VALUE_SHIFT: u32 = 32;
const HIGHLIGHT_MASK: u64 = 0xFF;

/// One datum being sorted.
///
/// `highlight > 0` marks the element as recently compared. Painting a frame
/// that includes it decrements the counter by one, saturating at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Element {
    /// The sort key.
    pub value: u32,
    /// Remaining highlighted frames.
    pub highlight: u8,
}

impl Element {
    /// An unhighlighted element.
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            highlight: 0,
        }
    }

    /// Whether the element is drawn as recently compared.
    pub const fn is_highlighted(&self) -> bool {
        self.highlight > 0
    }

    const fn pack(self) -> u64 {
        ((self.value as u64) << VALUE_SHIFT) | self.highlight as u64
    }

    const fn unpack(bits: u64) -> Self {
        Self {
            value: (bits >> VALUE_SHIFT) as u32,
            highlight: (bits & HIGHLIGHT_MASK) as u8,
        }
    }
}

impl From<u32> for Element {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.highlight > 0 {
            write!(f, "{}*{}", self.value, self.highlight)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Storage cell for one [`Element`] inside a [`Dataset`](crate::Dataset).
///
/// All operations are single atomic accesses, so a painter may read and
/// decay highlights while the owning task loads and stores elements.
#[derive(Default)]
pub struct Slot(AtomicU64);

impl Slot {
    /// A slot holding `element`.
    pub fn new(element: Element) -> Self {
        Self(AtomicU64::new(element.pack()))
    }

    /// Current contents.
    pub fn load(&self) -> Element {
        Element::unpack(self.0.load(Ordering::Acquire))
    }

    /// Replace the contents, highlight included.
    pub fn store(&self, element: Element) {
        self.0.store(element.pack(), Ordering::Release);
    }

    /// Replace the value, keeping whatever highlight the slot has now.
    pub fn store_value(&self, value: u32) {
        self.update(|e| Some(Element { value, ..e }));
    }

    /// Set the highlight counter, keeping the value.
    pub fn mark(&self, ticks: u8) {
        self.update(|e| {
            Some(Element {
                highlight: ticks,
                ..e
            })
        });
    }

    /// Decrement a positive highlight by one and return the element as it
    /// was before the decrement.
    pub fn decay(&self) -> Element {
        self.update(|e| {
            e.highlight
                .checked_sub(1)
                .map(|highlight| Element { highlight, ..e })
        })
    }

    /// Reset the highlight counter to zero.
    pub fn clear_highlight(&self) {
        self.update(|e| (e.highlight > 0).then_some(Element::new(e.value)));
    }

    fn update(&self, mut f: impl FnMut(Element) -> Option<Element>) -> Element {
        let prev = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                f(Element::unpack(bits)).map(Element::pack)
            });
        match prev {
            Ok(bits) | Err(bits) => Element::unpack(bits),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.load()).finish()
    }
}
