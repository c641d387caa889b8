//! The shared rendering surface.
//!
//! One [`SharedSurface`] exists per animator. It owns the external
//! [`Canvas`], the lanes bound for the current run, and a reusable
//! [`Frame`], all behind a single mutex: every repaint, from whichever
//! task's comparison triggered it, rebuilds and presents the whole frame
//! while holding that lock, so frames never interleave.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sortvis_core::Dataset;

/// Size of a drawable area in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Geometry {
    /// A `width` x `height` area.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// This area stacked vertically `lanes` times (at least once).
    pub fn stacked(self, lanes: usize) -> Self {
        let lanes = u32::try_from(lanes.max(1)).unwrap_or(u32::MAX);
        Self {
            width: self.width,
            height: self.height.saturating_mul(lanes),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One element as drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bar {
    /// Element value; bar length is proportional to it.
    pub value: u32,
    /// Drawn in the highlight color.
    pub highlighted: bool,
}

/// One lane as drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaneFrame {
    /// Name of the plug-in sorting this lane.
    pub name: String,
    /// Bars in dataset order.
    pub bars: Vec<Bar>,
}

/// Everything the canvas needs to draw one picture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Total drawable area, lanes stacked vertically.
    pub geometry: Geometry,
    /// Lanes top to bottom, in run queue order.
    pub lanes: Vec<LaneFrame>,
    /// Set on the final frame of a run; no bar is highlighted.
    pub settled: bool,
}

impl Frame {
    /// Highlighted bars across all lanes.
    pub fn highlighted_count(&self) -> usize {
        self.lanes
            .iter()
            .map(|l| l.bars.iter().filter(|b| b.highlighted).count())
            .sum()
    }
}

/// External drawing collaborator.
///
/// Called only while the surface lock is held, so implementations never
/// see concurrent calls.
pub trait Canvas: Send + 'static {
    /// The drawable area changed.
    fn resize(&mut self, geometry: Geometry);

    /// Draw `frame`.
    fn present(&mut self, frame: &Frame);
}

/// Canvas that discards everything. For benchmarks and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn resize(&mut self, _geometry: Geometry) {}

    fn present(&mut self, _frame: &Frame) {}
}

/// A lane to draw: its label and the dataset being sorted.
#[derive(Clone, Debug)]
pub struct LaneBinding {
    /// Label drawn with the lane.
    pub name: String,
    /// Shared with the task sorting it.
    pub dataset: Arc<Dataset>,
}

/// Object-safe view of a [`SharedSurface`] for code that only triggers
/// painting.
pub trait Repaint: Send + Sync {
    /// Rebuild and present the frame, decaying highlights once.
    fn repaint(&self);

    /// Clear all highlights and present the final frame.
    fn settle(&self);

    /// Frames presented so far.
    fn frames_painted(&self) -> u64;
}

struct SurfaceState<C> {
    canvas: C,
    lanes: Vec<LaneBinding>,
    frame: Frame,
    frames_painted: u64,
}

impl<C: Canvas> SurfaceState<C> {
    fn rebuild(&mut self, decay: bool) {
        let Self { lanes, frame, .. } = self;
        frame.lanes.resize_with(lanes.len(), LaneFrame::default);
        for (binding, out) in lanes.iter().zip(frame.lanes.iter_mut()) {
            out.name.clone_from(&binding.name);
            out.bars.clear();
            out.bars.extend(binding.dataset.slots().iter().map(|slot| {
                let e = if decay { slot.decay() } else { slot.load() };
                Bar {
                    value: e.value,
                    highlighted: e.is_highlighted(),
                }
            }));
        }
    }

    fn present(&mut self) {
        self.canvas.present(&self.frame);
        self.frames_painted += 1;
    }
}

/// Mutex-guarded canvas plus the lanes it draws.
pub struct SharedSurface<C> {
    viewport: Geometry,
    state: Mutex<SurfaceState<C>>,
}

impl<C: Canvas> SharedSurface<C> {
    /// Take ownership of `canvas` and size it to `viewport`.
    pub fn new(mut canvas: C, viewport: Geometry) -> Self {
        canvas.resize(viewport);
        Self {
            viewport,
            state: Mutex::new(SurfaceState {
                canvas,
                lanes: Vec::new(),
                frame: Frame {
                    geometry: viewport,
                    ..Frame::default()
                },
                frames_painted: 0,
            }),
        }
    }

    /// Bind the lanes of a run. The canvas grows to one viewport height per
    /// lane and the initial frame is presented. Returns the new geometry.
    pub fn bind(&self, lanes: Vec<LaneBinding>) -> Geometry {
        let geometry = self.viewport.stacked(lanes.len());
        let mut state = self.lock();
        state.lanes = lanes;
        state.canvas.resize(geometry);
        state.frame.geometry = geometry;
        state.frame.settled = false;
        state.rebuild(false);
        state.present();
        geometry
    }

    /// Drop all lanes and restore the viewport geometry.
    pub fn unbind(&self) {
        let mut state = self.lock();
        state.lanes.clear();
        state.canvas.resize(self.viewport);
        state.frame = Frame {
            geometry: self.viewport,
            ..Frame::default()
        };
        state.present();
    }

    /// Rebuild the frame from every lane's current slots, decaying each
    /// positive highlight once, and present it.
    pub fn redraw(&self) {
        let mut state = self.lock();
        state.frame.settled = false;
        state.rebuild(true);
        state.present();
    }

    /// Clear every highlight and present a settled frame.
    pub fn settle(&self) {
        let mut state = self.lock();
        for lane in &state.lanes {
            lane.dataset.clear_highlights();
        }
        state.rebuild(false);
        state.frame.settled = true;
        state.present();
    }

    /// Run `f` on the canvas under the surface lock.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.lock().canvas)
    }

    /// Copy of the most recently built frame.
    pub fn frame(&self) -> Frame {
        self.lock().frame.clone()
    }

    /// Frames presented so far.
    pub fn frames_painted(&self) -> u64 {
        self.lock().frames_painted
    }

    /// Current total drawable area.
    pub fn geometry(&self) -> Geometry {
        self.lock().frame.geometry
    }

    /// Drawable area of one lane.
    pub fn viewport(&self) -> Geometry {
        self.viewport
    }

    /// Lanes currently bound.
    pub fn lane_count(&self) -> usize {
        self.lock().lanes.len()
    }

    // A plug-in panicking mid-repaint must not wedge the UI.
    fn lock(&self) -> MutexGuard<'_, SurfaceState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Canvas> Repaint for SharedSurface<C> {
    fn repaint(&self) {
        self.redraw();
    }

    fn settle(&self) {
        SharedSurface::settle(self);
    }

    fn frames_painted(&self) -> u64 {
        SharedSurface::frames_painted(self)
    }
}

impl<C> fmt::Debug for SharedSurface<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSurface")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Probe {
        log: Arc<Mutex<Vec<(Geometry, Option<Frame>)>>>,
    }

    impl Canvas for Probe {
        fn resize(&mut self, geometry: Geometry) {
            self.log.lock().unwrap().push((geometry, None));
        }

        fn present(&mut self, frame: &Frame) {
            self.log
                .lock()
                .unwrap()
                .push((frame.geometry, Some(frame.clone())));
        }
    }

    fn lane(name: &str, values: &[u32]) -> LaneBinding {
        LaneBinding {
            name: name.into(),
            dataset: Arc::new(Dataset::from_values(values.iter().copied())),
        }
    }

    #[test]
    fn bind_stacks_lanes_and_unbind_restores() {
        let probe = Probe::default();
        let surface = SharedSurface::new(probe.clone(), Geometry::new(10, 4));
        let g = surface.bind(vec![lane("a", &[1, 2]), lane("b", &[2, 1]), lane("c", &[3])]);
        assert_eq!(g, Geometry::new(10, 12));
        assert_eq!(surface.geometry(), g);
        assert_eq!(surface.lane_count(), 3);
        surface.unbind();
        assert_eq!(surface.geometry(), Geometry::new(10, 4));
        assert_eq!(surface.lane_count(), 0);
        let log = probe.log.lock().unwrap();
        let resizes: Vec<Geometry> = log
            .iter()
            .filter(|(_, f)| f.is_none())
            .map(|(g, _)| *g)
            .collect();
        assert_eq!(
            resizes,
            vec![Geometry::new(10, 4), Geometry::new(10, 12), Geometry::new(10, 4)]
        );
    }

    #[test]
    fn zero_lanes_keep_one_viewport() {
        let surface = SharedSurface::new(NullCanvas, Geometry::new(10, 4));
        assert_eq!(surface.bind(Vec::new()), Geometry::new(10, 4));
    }

    #[test]
    fn redraw_decays_highlights_once_per_frame() {
        let surface = SharedSurface::new(NullCanvas, Geometry::new(10, 4));
        let binding = lane("a", &[3, 1, 2]);
        let data = Arc::clone(&binding.dataset);
        surface.bind(vec![binding]);
        data.slots()[1].mark(2);

        surface.redraw();
        assert_eq!(surface.frame().highlighted_count(), 1);
        surface.redraw();
        assert_eq!(surface.frame().highlighted_count(), 1);
        surface.redraw();
        assert_eq!(surface.frame().highlighted_count(), 0);
        assert_eq!(data.slots()[1].load().highlight, 0);
    }

    #[test]
    fn settle_clears_everything() {
        let surface = SharedSurface::new(NullCanvas, Geometry::new(10, 4));
        let a = lane("a", &[1, 2, 3]);
        let b = lane("b", &[3, 2, 1]);
        for slot in a.dataset.slots().iter().chain(b.dataset.slots()) {
            slot.mark(5);
        }
        surface.bind(vec![a.clone(), b.clone()]);
        surface.settle();
        let frame = surface.frame();
        assert!(frame.settled);
        assert_eq!(frame.highlighted_count(), 0);
        assert!(a.dataset.elements().iter().all(|e| !e.is_highlighted()));
        assert_eq!(frame.lanes[1].name, "b");
        assert_eq!(
            frame.lanes[1].bars.iter().map(|b| b.value).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn frames_painted_counts_presents() {
        let surface = SharedSurface::new(NullCanvas, Geometry::new(1, 1));
        surface.bind(vec![lane("a", &[1])]);
        surface.redraw();
        surface.settle();
        assert_eq!(surface.frames_painted(), 3);
    }

    #[test]
    fn with_canvas_reaches_the_canvas() {
        let probe = Probe::default();
        let surface = SharedSurface::new(probe.clone(), Geometry::new(2, 2));
        surface.with_canvas(|c| c.present(&Frame::default()));
        assert_eq!(probe.log.lock().unwrap().len(), 2);
    }
}
