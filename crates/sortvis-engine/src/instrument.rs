//! The comparator handed to plug-ins during a run.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sortvis_core::{Comparator, Slot};

use crate::surface::Repaint;

/// Wraps the natural order with visualization side effects.
///
/// Each call marks both slots as highlighted for `ticks` frames, performs
/// one synchronous repaint of the shared surface, then answers
/// `x.value <= y.value`. It knows nothing about lanes or tasks: the marked
/// slots belong to whichever dataset the caller is sorting.
pub struct InstrumentedComparator {
    surface: Arc<dyn Repaint>,
    ticks: u8,
    comparisons: AtomicU64,
}

impl InstrumentedComparator {
    /// Comparator repainting `surface` and highlighting for `ticks` frames.
    pub fn new(surface: Arc<dyn Repaint>, ticks: u8) -> Self {
        Self {
            surface,
            ticks,
            comparisons: AtomicU64::new(0),
        }
    }

    /// Calls made so far.
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }
}

impl Comparator for InstrumentedComparator {
    fn compare(&self, x: &Slot, y: &Slot) -> bool {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
        x.mark(self.ticks);
        y.mark(self.ticks);
        self.surface.repaint();
        x.load().value <= y.load().value
    }
}

impl fmt::Debug for InstrumentedComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentedComparator")
            .field("ticks", &self.ticks)
            .field("comparisons", &self.comparisons())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_core::Element;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingRepaint {
        repaints: AtomicUsize,
    }

    impl Repaint for CountingRepaint {
        fn repaint(&self) {
            self.repaints.fetch_add(1, Ordering::Relaxed);
        }

        fn settle(&self) {}

        fn frames_painted(&self) -> u64 {
            self.repaints.load(Ordering::Relaxed) as u64
        }
    }

    #[test]
    fn marks_repaints_and_compares() {
        let surface = Arc::new(CountingRepaint::default());
        let cmp = InstrumentedComparator::new(surface.clone(), 5);
        let a = Slot::new(Element::new(4));
        let b = Slot::new(Element::new(7));

        assert!(cmp.compare(&a, &b));
        assert!(!cmp.compare(&b, &a));
        assert!(cmp.compare(&a, &a));

        assert_eq!(cmp.comparisons(), 3);
        assert_eq!(surface.repaints.load(Ordering::Relaxed), 3);
        assert_eq!(a.load().highlight, 5);
        assert_eq!(b.load().value, 7);
        assert_eq!(b.load().highlight, 5);
    }
}
