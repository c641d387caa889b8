//! Modes and the input vocabulary.

use std::fmt;

/// Top-level state of the animator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Title screen.
    #[default]
    Start,
    /// Scrollable help text.
    Help,
    /// Quantity and algorithm selection form.
    Config,
    /// A run is in progress; no input is accepted.
    Sorting,
    /// The run finished and its settled frame is on screen.
    Sorted,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Config => "config",
            Self::Sorting => "sorting",
            Self::Sorted => "sorted",
        };
        f.write_str(name)
    }
}

/// Keys the animator distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A decimal digit `0..=9`.
    Digit(u8),
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Tab.
    Tab,
    /// Enter / confirm.
    Enter,
    /// Escape / cancel.
    Escape,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Help shortcut.
    Help,
    /// Replay shortcut.
    Replay,
    /// Anything else.
    Other,
}

/// One user input, already translated from the frontend's events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// A key press.
    Key(Key),
    /// Mouse wheel; positive values scroll up.
    Wheel(i32),
    /// Scrollbar drag to an absolute line position.
    ScrollTo(usize),
    /// A click outside any field.
    Click,
    /// A click on configuration field `i`.
    PickField(usize),
    /// Close the session.
    Quit,
}

impl From<Key> for Input {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// Result of one mode handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    To(Mode),
}
