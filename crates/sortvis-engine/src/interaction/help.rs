//! Help text: loading, word wrapping and scrolling.

use std::fs;
use std::path::Path;

use crate::config::StartupError;
use crate::surface::Geometry;

const CONTINUATION_INDENT: &str = "  ";

/// Line-oriented help text as read from disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpDocument {
    lines: Vec<String>,
}

impl HelpDocument {
    /// Read `path`. A missing or unreadable file is fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| StartupError::HelpUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let document = Self::from_lines(text.lines());
        tracing::debug!(path = %path.display(), lines = document.lines.len(), "loaded help");
        Ok(document)
    }

    /// Build a document from in-memory lines.
    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Source lines, unwrapped.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A [`HelpDocument`] wrapped to a viewport, with a scroll position.
///
/// Each source line wraps independently; continuation lines are indented
/// by two columns. When the wrapped text is taller than the viewport it is
/// wrapped one column narrower to leave room for a scrollbar.
#[derive(Clone, Debug)]
pub struct HelpView {
    document: HelpDocument,
    viewport: Geometry,
    wrapped: Vec<String>,
    scrollbar: bool,
    scroll: usize,
}

impl HelpView {
    /// Wrap `document` for `viewport`.
    pub fn new(document: HelpDocument, viewport: Geometry) -> Self {
        let mut view = Self {
            document,
            viewport,
            wrapped: Vec::new(),
            scrollbar: false,
            scroll: 0,
        };
        view.rewrap();
        view
    }

    /// Re-wrap for a new viewport, keeping the scroll position if possible.
    pub fn resize(&mut self, viewport: Geometry) {
        self.viewport = viewport;
        self.rewrap();
    }

    /// Wrapped lines.
    pub fn lines(&self) -> &[String] {
        &self.wrapped
    }

    /// Wrapped lines currently inside the viewport.
    pub fn visible_lines(&self) -> &[String] {
        let end = (self.scroll + self.viewport.height as usize).min(self.wrapped.len());
        &self.wrapped[self.scroll.min(end)..end]
    }

    /// Number of wrapped lines.
    pub fn content_height(&self) -> usize {
        self.wrapped.len()
    }

    /// Whether the content overflows and a scrollbar column is reserved.
    pub fn has_scrollbar(&self) -> bool {
        self.scrollbar
    }

    /// First visible wrapped line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Largest valid scroll position.
    pub fn max_scroll(&self) -> usize {
        self.wrapped
            .len()
            .saturating_sub(self.viewport.height as usize)
    }

    /// Viewport the text is wrapped for.
    pub fn viewport(&self) -> Geometry {
        self.viewport
    }

    /// Scroll by `delta` lines (negative is up), clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target);
    }

    /// Scroll to line `position`, clamped.
    pub fn scroll_to(&mut self, position: usize) {
        self.scroll = position.min(self.max_scroll());
    }

    fn rewrap(&mut self) {
        let width = self.viewport.width as usize;
        let height = self.viewport.height as usize;
        self.wrapped = wrap_document(&self.document, width);
        self.scrollbar = self.wrapped.len() > height && width > 1;
        if self.scrollbar {
            self.wrapped = wrap_document(&self.document, width - 1);
        }
        self.scroll_to(self.scroll);
    }
}

fn wrap_document(document: &HelpDocument, width: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(document.lines.len());
    for line in &document.lines {
        wrap_line(line, width, &mut out);
    }
    out
}

/// Greedy word wrap of one source line to `width` columns.
fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let width = width.max(1);
    if line.trim().is_empty() {
        out.push(String::new());
        return;
    }
    let indent = if width > CONTINUATION_INDENT.len() {
        CONTINUATION_INDENT
    } else {
        ""
    };

    let mut current = String::new();
    let mut len = 0;
    let mut has_words = false;

    for word in line.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();
        let needed = if has_words { word_len + 1 } else { word_len };
        if len + needed <= width {
            if has_words {
                current.push(' ');
            }
            current.push_str(word);
            len += needed;
            has_words = true;
            continue;
        }
        if has_words {
            out.push(std::mem::replace(&mut current, indent.to_string()));
            len = indent.len();
        }
        // Split words that cannot fit even on an empty line.
        while len + word_len > width {
            let take = width - len;
            let split = word
                .char_indices()
                .nth(take)
                .map_or(word.len(), |(i, _)| i);
            current.push_str(&word[..split]);
            out.push(std::mem::replace(&mut current, indent.to_string()));
            len = indent.len();
            word = &word[split..];
            word_len -= take;
        }
        current.push_str(word);
        len += word_len;
        has_words = true;
    }
    out.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(line: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        wrap_line(line, width, &mut out);
        out
    }

    #[test]
    fn short_line_is_untouched() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn continuation_lines_are_indented() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two", "  three", "  four"]
        );
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "  ef", "  gh", "  ij"]);
    }

    #[test]
    fn blank_lines_survive() {
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("   ", 10), vec![""]);
    }

    #[test]
    fn overflow_reserves_scrollbar_column() {
        let doc = HelpDocument::from_lines(["aaaa bbbb", "cc", "dd"]);
        let fits = HelpView::new(doc.clone(), Geometry::new(9, 3));
        assert!(!fits.has_scrollbar());
        assert_eq!(fits.lines(), ["aaaa bbbb", "cc", "dd"]);

        let tall = HelpView::new(doc, Geometry::new(9, 2));
        assert!(tall.has_scrollbar());
        assert_eq!(tall.lines(), ["aaaa", "  bbbb", "cc", "dd"]);
        assert_eq!(tall.max_scroll(), 2);
    }

    #[test]
    fn scrolling_is_clamped() {
        let doc = HelpDocument::from_lines((0..10).map(|i| format!("line {i}")));
        let mut view = HelpView::new(doc, Geometry::new(20, 4));
        assert_eq!(view.max_scroll(), 6);
        view.scroll_by(-3);
        assert_eq!(view.scroll(), 0);
        view.scroll_by(4);
        assert_eq!(view.scroll(), 4);
        view.scroll_by(100);
        assert_eq!(view.scroll(), 6);
        assert_eq!(view.visible_lines(), ["line 6", "line 7", "line 8", "line 9"]);
        view.scroll_to(2);
        assert_eq!(view.scroll(), 2);
        view.scroll_to(99);
        assert_eq!(view.scroll(), 6);
    }

    #[test]
    fn short_document_never_scrolls() {
        let mut view = HelpView::new(HelpDocument::from_lines(["hi"]), Geometry::new(20, 4));
        view.scroll_by(5);
        assert_eq!(view.scroll(), 0);
        assert_eq!(view.visible_lines(), ["hi"]);
    }

    #[test]
    fn missing_file_is_a_startup_error() {
        let err = HelpDocument::load("/nonexistent/sortvis/help_msg.txt").unwrap_err();
        assert!(matches!(err, StartupError::HelpUnavailable { .. }));
    }
}
