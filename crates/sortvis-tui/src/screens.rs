//! Rendering of each mode's screen.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ body (mode specific)                     │
//! │                                          │
//! ├──────────────────────────────────────────┤
//! │ footer: key hints or run summary         │
//! └──────────────────────────────────────────┘
//! ```

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use sortvis_algorithm::AlgorithmRegistry;
use sortvis_engine::interaction::ConfigForm;
use sortvis_engine::{Frame, HelpView, RunReport};

use crate::canvas::LanesWidget;

/// Everything one screen needs, borrowed from the animator.
pub enum Screen<'a> {
    /// Title screen.
    Start,
    /// Scrollable help.
    Help {
        /// Wrapped text and scroll position.
        view: &'a HelpView,
    },
    /// Configuration form.
    Config {
        /// Focus and quantity text.
        form: &'a ConfigForm,
        /// Registered plug-ins with their selection flags.
        registry: &'a AlgorithmRegistry,
    },
    /// Finished run.
    Sorted {
        /// Report of the run, if it produced one.
        report: Option<&'a RunReport>,
    },
}

/// Clickable regions of the last drawn screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Configuration fields, indexed like the form's focus.
    pub fields: Vec<Rect>,
    /// Help scrollbar track.
    pub scrollbar: Option<Rect>,
}

impl ScreenLayout {
    /// Configuration field under the cell `(column, row)`.
    pub fn field_at(&self, column: u16, row: u16) -> Option<usize> {
        self.fields.iter().position(|r| contains(*r, column, row))
    }

    /// Scroll position for a press or drag at `(column, row)` on the
    /// scrollbar track.
    pub fn scroll_position(&self, column: u16, row: u16, max_scroll: usize) -> Option<usize> {
        let track = self.scrollbar?;
        if !contains(track, column, row) {
            return None;
        }
        let offset = usize::from(row - track.y);
        let span = usize::from(track.height.saturating_sub(1)).max(1);
        Some(offset * max_scroll / span)
    }
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Draw `screen`. Returns the regions the event loop hit-tests against.
pub fn render(f: &mut ratatui::Frame, screen: &Screen<'_>, lanes: &Frame) -> ScreenLayout {
    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());
    let buf = f.buffer_mut();
    let mut layout = ScreenLayout::default();
    let hints = match screen {
        Screen::Start => {
            render_start(body, buf);
            "any key: continue | q: quit".to_string()
        }
        Screen::Help { view } => {
            layout.scrollbar = render_help(view, body, buf);
            "Enter/Esc: continue | arrows, wheel, drag: scroll".to_string()
        }
        Screen::Config { form, registry } => {
            layout.fields = render_config(form, registry, body, buf);
            "Tab/arrows: move | Enter: toggle | h: help | Esc: back".to_string()
        }
        Screen::Sorted { report } => {
            LanesWidget { lanes }.render(body, buf);
            sorted_summary(*report)
        }
    };
    Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .render(footer, buf);
    layout
}

fn render_start(area: Rect, buf: &mut ratatui::buffer::Buffer) {
    let top = area.height.saturating_sub(3) / 2;
    let lines = vec![
        Line::from(Span::styled(
            "sortvis",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("concurrent sorting, one frame per comparison"),
    ];
    let text_area = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(text_area, buf);
}

fn render_help(view: &HelpView, area: Rect, buf: &mut ratatui::buffer::Buffer) -> Option<Rect> {
    let lines: Vec<Line<'_>> = view
        .visible_lines()
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    Paragraph::new(lines).render(area, buf);
    if !view.has_scrollbar() || area.width == 0 {
        return None;
    }

    let track = Rect {
        x: area.x + area.width - 1,
        width: 1,
        ..area
    };
    let thumb = if view.max_scroll() == 0 {
        0
    } else {
        view.scroll() * usize::from(track.height.saturating_sub(1)) / view.max_scroll()
    };
    for row in 0..track.height {
        let symbol = if usize::from(row) == thumb { '█' } else { '│' };
        if let Some(cell) = buf.cell_mut((track.x, track.y + row)) {
            cell.set_char(symbol).set_fg(Color::DarkGray);
        }
    }
    Some(track)
}

fn render_config(
    form: &ConfigForm,
    registry: &AlgorithmRegistry,
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
) -> Vec<Rect> {
    let focused = Style::default().add_modifier(Modifier::REVERSED);
    let style_for = |field: usize| {
        if form.focus() == field {
            focused
        } else {
            Style::default()
        }
    };

    let quantity = form.quantity();
    let (before, rest) = quantity.text().split_at(quantity.cursor().min(quantity.text().len()));
    let (at, after) = match rest.chars().next() {
        Some(c) => rest.split_at(c.len_utf8()),
        None => (" ", ""),
    };
    let cursor = if form.focus() == 0 {
        Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Configuration",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Quantity: ", style_for(0)),
            Span::raw(before),
            Span::styled(at, cursor),
            Span::raw(after),
        ]),
    ];
    for (i, entry) in registry.entries().enumerate() {
        let mark = if entry.selected { "[x]" } else { "[ ]" };
        let tag = if entry.algorithm.is_parallel() {
            " (parallel)"
        } else {
            ""
        };
        lines.push(Line::from(Span::styled(
            format!("{mark} {}{tag}", entry.name),
            style_for(i + 1),
        )));
    }
    lines.push(Line::from(Span::styled(
        "[ Continue ]",
        style_for(registry.len() + 1),
    )));
    Paragraph::new(lines).render(area, buf);

    (0..registry.len() + 2)
        .map(|field| Rect {
            y: area.y + 2 + field as u16,
            height: 1,
            ..area
        })
        .filter(|r| r.y < area.y + area.height)
        .collect()
}

fn sorted_summary(report: Option<&RunReport>) -> String {
    let Some(report) = report else {
        return "r: replay | Enter/Esc: back".to_string();
    };
    let m = &report.metrics;
    let mut summary = format!(
        "{} lanes, {} comparisons, {} frames, {} ms",
        report.lanes.len(),
        m.comparisons,
        m.frames_painted,
        m.elapsed_us / 1000
    );
    let failed: Vec<&str> = report.failures().map(|l| l.name.as_str()).collect();
    if !failed.is_empty() {
        summary.push_str(&format!(" | failed: {}", failed.join(", ")));
    }
    summary.push_str(" | r: replay | Enter/Esc: back");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sortvis_algorithms::{register_defaults, DEFAULT_NAMES};
    use sortvis_engine::{Geometry, HelpDocument};

    fn draw(screen: &Screen<'_>, width: u16, height: u16) -> (Terminal<TestBackend>, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|f| layout = render(f, screen, &Frame::default()))
            .unwrap();
        (terminal, layout)
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn config_rows_are_clickable_fields() {
        let mut registry = AlgorithmRegistry::new();
        register_defaults(&mut registry).unwrap();
        registry.toggle(0.into());
        let form = ConfigForm::new(42);
        let screen = Screen::Config {
            form: &form,
            registry: &registry,
        };
        let (terminal, layout) = draw(&screen, 40, 16);

        assert_eq!(row(&terminal, 2), "Quantity: 42");
        assert_eq!(row(&terminal, 3), format!("[x] {}", DEFAULT_NAMES[0]));
        assert_eq!(row(&terminal, 4), format!("[ ] {}", DEFAULT_NAMES[1]));
        assert_eq!(row(&terminal, 7), format!("[ ] {} (parallel)", DEFAULT_NAMES[4]));
        assert_eq!(row(&terminal, 12), "[ Continue ]");
        assert_eq!(layout.fields.len(), DEFAULT_NAMES.len() + 2);
        assert_eq!(layout.field_at(5, 2), Some(0));
        assert_eq!(layout.field_at(0, 3), Some(1));
        assert_eq!(layout.field_at(0, 12), Some(DEFAULT_NAMES.len() + 1));
        assert_eq!(layout.field_at(0, 0), None);
    }

    #[test]
    fn help_scrollbar_maps_rows_to_positions() {
        let doc = HelpDocument::from_lines((0..20).map(|i| format!("line {i}")));
        let view = HelpView::new(doc, Geometry::new(20, 5));
        let (terminal, layout) = draw(&Screen::Help { view: &view }, 20, 6);

        assert_eq!(row(&terminal, 0), format!("line 0{}█", " ".repeat(13)));
        let track = layout.scrollbar.unwrap();
        assert_eq!((track.x, track.height), (19, 5));
        assert_eq!(layout.scroll_position(19, 0, view.max_scroll()), Some(0));
        assert_eq!(layout.scroll_position(19, 4, view.max_scroll()), Some(15));
        assert_eq!(layout.scroll_position(3, 4, view.max_scroll()), None);
    }

    #[test]
    fn short_help_has_no_scrollbar() {
        let view = HelpView::new(HelpDocument::from_lines(["hi"]), Geometry::new(20, 5));
        let (_, layout) = draw(&Screen::Help { view: &view }, 20, 6);
        assert_eq!(layout.scrollbar, None);
    }

    #[test]
    fn sorted_footer_reports_failures() {
        use sortvis_core::{AlgorithmId, LaneId, RunId};
        use sortvis_engine::LaneReport;

        let mut report = RunReport::empty(RunId(1));
        report.lanes.push(LaneReport {
            lane: LaneId(0),
            algorithm: AlgorithmId(0),
            name: "Broken".into(),
            len: 3,
            sorted: false,
            failure: Some("boom".into()),
        });
        let summary = sorted_summary(Some(&report));
        assert!(summary.starts_with("1 lanes, 0 comparisons"), "{summary}");
        assert!(summary.contains("failed: Broken"), "{summary}");
        assert!(sorted_summary(None).contains("replay"));
    }
}
