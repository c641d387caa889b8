//! A [`Canvas`] that draws into the terminal.
//!
//! Lane frames arrive from sorting threads under the surface lock and are
//! drawn immediately. The other screens are drawn from the event loop
//! through [`SharedSurface::with_canvas`](sortvis_engine::SharedSurface::with_canvas),
//! so every terminal write is serialized by the same lock.

use std::io::{self, Stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use ratatui::Terminal;
use sortvis_engine::{Canvas, Frame, Geometry, LaneFrame};

use crate::screens::{self, Screen, ScreenLayout};

/// Terminal-backed canvas.
pub struct TerminalCanvas<B: Backend = CrosstermBackend<Stdout>> {
    terminal: Terminal<B>,
    geometry: Geometry,
    frame: Frame,
    layout: ScreenLayout,
    draw_failed: bool,
}

impl TerminalCanvas {
    /// Enter raw mode and the alternate screen, with mouse capture.
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Self::with_backend(CrosstermBackend::new(stdout))
    }

    /// Leave the alternate screen and raw mode.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()
    }
}

impl<B: Backend> TerminalCanvas<B> {
    /// Canvas over an already prepared backend.
    pub fn with_backend(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            geometry: Geometry::default(),
            frame: Frame::default(),
            layout: ScreenLayout::default(),
            draw_failed: false,
        })
    }

    /// Hit-test regions of the most recently drawn screen.
    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// Draw a non-lane screen, or the lanes with the given footer.
    pub fn draw_screen(&mut self, screen: &Screen<'_>) -> io::Result<()> {
        let lanes = &self.frame;
        let mut layout = ScreenLayout::default();
        self.terminal.draw(|f| {
            layout = screens::render(f, screen, lanes);
        })?;
        self.layout = layout;
        Ok(())
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend + Send + 'static> Canvas for TerminalCanvas<B> {
    fn resize(&mut self, geometry: Geometry) {
        if geometry == self.geometry {
            return;
        }
        tracing::debug!(from = %self.geometry, to = %geometry, "canvas resized");
        self.geometry = geometry;
        // Lane bands move; drop whatever the old layout left behind.
        if let Err(e) = self.terminal.clear() {
            tracing::warn!(error = %e, "terminal clear failed");
        }
    }

    fn present(&mut self, frame: &Frame) {
        self.frame.clone_from(frame);
        let lanes = &self.frame;
        let result = self.terminal.draw(|f| {
            let area = f.area();
            LanesWidget { lanes }.render(area, f.buffer_mut());
        });
        match result {
            Ok(_) => self.draw_failed = false,
            Err(e) if !self.draw_failed => {
                tracing::warn!(error = %e, "terminal draw failed");
                self.draw_failed = true;
            }
            Err(_) => {}
        }
    }
}

// ── Lane rendering ─────────────────────────────────────────────────

/// Every lane of a frame, stacked in equal horizontal bands.
pub struct LanesWidget<'a> {
    /// The frame to draw.
    pub lanes: &'a Frame,
}

impl Widget for LanesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.lanes.lanes.len();
        if count == 0 {
            return;
        }
        let bands = Layout::vertical(vec![Constraint::Ratio(1, count as u32); count]).split(area);
        for (lane, band) in self.lanes.lanes.iter().zip(bands.iter()) {
            render_lane(lane, *band, buf);
        }
    }
}

fn render_lane(lane: &LaneFrame, area: Rect, buf: &mut Buffer) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_stringn(
        area.x,
        area.y,
        &lane.name,
        area.width as usize,
        Style::default().fg(Color::Cyan),
    );
    let bars = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    if bars.height == 0 || lane.bars.is_empty() {
        return;
    }

    let n = lane.bars.len();
    let width = bars.width as usize;
    let max = lane.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
    for column in 0..width {
        let lo = column * n / width;
        let hi = ((column + 1) * n / width).max(lo + 1).min(n);
        if lo >= n {
            break;
        }
        let bucket = &lane.bars[lo..hi];
        let value = bucket.iter().map(|b| b.value).max().unwrap_or(0);
        let highlighted = bucket.iter().any(|b| b.highlighted);
        let height = bar_height(value, max, bars.height);
        let color = if highlighted { Color::Red } else { Color::White };
        let x = bars.x + column as u16;
        for row in 0..height {
            let y = bars.y + bars.height - 1 - row;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char('█').set_fg(color);
            }
        }
    }
}

/// Rows filled for `value` out of `max` in a band `rows` tall. Any
/// positive value gets at least one row.
fn bar_height(value: u32, max: u32, rows: u16) -> u16 {
    if value == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * u64::from(rows)).div_ceil(u64::from(max));
    scaled.clamp(1, u64::from(rows)) as u16
}
