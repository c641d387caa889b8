//! Translation of crossterm events into animator [`Input`]s.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use sortvis_engine::{Input, Key, Mode};

use crate::screens::ScreenLayout;

/// Stateful translator; remembers scrollbar drags between events.
#[derive(Debug, Default)]
pub struct InputTranslator {
    dragging: bool,
}

impl InputTranslator {
    /// Translate `event` for the screen last drawn in `mode`.
    /// `max_scroll` is the help view's largest scroll position.
    pub fn translate(
        &mut self,
        event: &Event,
        mode: Mode,
        layout: &ScreenLayout,
        max_scroll: usize,
    ) -> Option<Input> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse, mode, layout, max_scroll),
            _ => None,
        }
    }

    fn translate_mouse(
        &mut self,
        mouse: &MouseEvent,
        mode: Mode,
        layout: &ScreenLayout,
        max_scroll: usize,
    ) -> Option<Input> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Input::Wheel(1)),
            MouseEventKind::ScrollDown => Some(Input::Wheel(-1)),
            MouseEventKind::Down(MouseButton::Left) => match mode {
                Mode::Config => Some(
                    layout
                        .field_at(column, row)
                        .map_or(Input::Click, Input::PickField),
                ),
                Mode::Help => match layout.scroll_position(column, row, max_scroll) {
                    Some(position) => {
                        self.dragging = true;
                        Some(Input::ScrollTo(position))
                    }
                    None => Some(Input::Click),
                },
                _ => Some(Input::Click),
            },
            MouseEventKind::Drag(MouseButton::Left) if self.dragging && mode == Mode::Help => {
                let track = layout.scrollbar?;
                let row = row.clamp(track.y, track.y + track.height.saturating_sub(1));
                layout
                    .scroll_position(track.x, row, max_scroll)
                    .map(Input::ScrollTo)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                None
            }
            _ => None,
        }
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }
    let key = match key.code {
        KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
        KeyCode::Char('q' | 'Q') => return Some(Input::Quit),
        KeyCode::Char('h' | 'H') | KeyCode::F(1) => Key::Help,
        KeyCode::Char('r' | 'R') => Key::Replay,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        _ => Key::Other,
    };
    Some(Input::Key(key))
}
