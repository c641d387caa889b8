//! Keyboard and mouse navigation of the configuration form.
//!
//! Fields are numbered `0` (quantity), `1..=n` (one per registered
//! algorithm, in registry order) and `n + 1` (Continue). The form only
//! tracks focus and the quantity text; selection flags live in the
//! registry, so toggles are returned to the caller as [`FormAction`]s.

use sortvis_core::AlgorithmId;

use crate::interaction::mode::Key;
use crate::interaction::quantity::QuantityField;

/// What the focused field index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    /// The dataset size.
    Quantity,
    /// An algorithm toggle.
    Algorithm(AlgorithmId),
    /// The Continue button.
    Continue,
}

/// Effect of one form input that the form cannot apply itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    /// Nothing beyond focus or text changes.
    Stay,
    /// Flip the selection of an algorithm.
    Toggle(AlgorithmId),
    /// Start a run with the committed quantity.
    Start,
    /// Show the help screen.
    Help,
    /// Return to the start screen.
    Cancel,
}

/// Focus and quantity state of the configuration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigForm {
    quantity: QuantityField,
    focus: usize,
}

impl ConfigForm {
    /// Form focused on the quantity field, showing `quantity`.
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity: QuantityField::new(quantity),
            focus: 0,
        }
    }

    /// The quantity field.
    pub fn quantity(&self) -> &QuantityField {
        &self.quantity
    }

    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Meaning of the focused field for a form with `algorithms` toggles.
    pub fn focused_field(&self, algorithms: usize) -> FormField {
        field_at(self.focus, algorithms)
    }

    /// Commit the quantity text and return its value.
    pub fn commit(&mut self) -> u32 {
        self.quantity.commit()
    }

    /// Apply a key press to a form with `algorithms` toggles.
    pub fn handle_key(&mut self, key: Key, algorithms: usize) -> FormAction {
        let last = algorithms + 1;
        match key {
            Key::Digit(d) => {
                if self.focus == 0 {
                    self.quantity.insert_digit(d);
                }
            }
            Key::Help => return FormAction::Help,
            Key::Escape => return FormAction::Cancel,
            Key::Up => {
                self.focus = self.focus.saturating_sub(1);
                self.entered_field();
            }
            Key::Down => {
                if self.focus == 0 {
                    self.quantity.commit();
                }
                self.focus = (self.focus + 1).min(last);
            }
            Key::Left => {
                if self.focus == 0 {
                    self.quantity.cursor_left();
                } else {
                    self.focus -= 1;
                    self.entered_field();
                }
            }
            Key::Right => {
                if self.focus == 0 && !self.quantity.at_end() {
                    self.quantity.cursor_right();
                } else if self.focus == 0 {
                    self.quantity.commit();
                    self.focus += 1;
                } else if self.focus < last {
                    self.focus += 1;
                }
            }
            Key::Backspace => {
                if self.focus == 0 {
                    self.quantity.backspace();
                }
            }
            Key::Delete => {
                if self.focus == 0 {
                    self.quantity.delete();
                }
            }
            Key::Tab => {
                if self.focus == 0 {
                    self.quantity.commit();
                }
                self.focus = (self.focus + 1) % (last + 1);
                self.entered_field();
            }
            Key::Enter => match field_at(self.focus, algorithms) {
                FormField::Quantity => {
                    self.quantity.commit();
                    self.focus += 1;
                }
                FormField::Algorithm(id) => return FormAction::Toggle(id),
                FormField::Continue => return FormAction::Start,
            },
            Key::Replay | Key::Other => {}
        }
        FormAction::Stay
    }

    /// Apply a click on field `index`. The quantity is committed first.
    pub fn pick(&mut self, index: usize, algorithms: usize) -> FormAction {
        self.quantity.commit();
        if index > algorithms + 1 {
            return FormAction::Stay;
        }
        self.focus = index;
        match field_at(index, algorithms) {
            FormField::Quantity => {
                self.quantity.cursor_to_end();
                FormAction::Stay
            }
            FormField::Algorithm(id) => FormAction::Toggle(id),
            FormField::Continue => FormAction::Start,
        }
    }

    fn entered_field(&mut self) {
        if self.focus == 0 {
            self.quantity.cursor_to_end();
        }
    }
}

fn field_at(index: usize, algorithms: usize) -> FormField {
    match index {
        0 => FormField::Quantity,
        i if i <= algorithms => FormField::Algorithm(AlgorithmId(i - 1)),
        _ => FormField::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 3;

    #[test]
    fn down_walks_to_continue_and_stops() {
        let mut form = ConfigForm::new(10);
        for expected in [1, 2, 3, 4, 4] {
            assert_eq!(form.handle_key(Key::Down, N), FormAction::Stay);
            assert_eq!(form.focus(), expected);
        }
        assert_eq!(form.focused_field(N), FormField::Continue);
    }

    #[test]
    fn up_stops_at_quantity_with_cursor_at_end() {
        let mut form = ConfigForm::new(123);
        form.handle_key(Key::Left, N);
        form.handle_key(Key::Down, N);
        form.handle_key(Key::Up, N);
        form.handle_key(Key::Up, N);
        assert_eq!(form.focus(), 0);
        assert_eq!(form.quantity().cursor(), 3);
    }

    #[test]
    fn left_right_move_cursor_before_leaving_quantity() {
        let mut form = ConfigForm::new(12);
        form.handle_key(Key::Left, N);
        assert_eq!((form.focus(), form.quantity().cursor()), (0, 1));
        form.handle_key(Key::Right, N);
        assert_eq!((form.focus(), form.quantity().cursor()), (0, 2));
        form.handle_key(Key::Right, N);
        assert_eq!(form.focus(), 1);
        form.handle_key(Key::Left, N);
        assert_eq!((form.focus(), form.quantity().cursor()), (0, 2));
    }

    #[test]
    fn tab_wraps_around() {
        let mut form = ConfigForm::new(1);
        for _ in 0..N + 2 {
            form.handle_key(Key::Tab, N);
        }
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn leaving_quantity_commits() {
        let mut form = ConfigForm::new(0);
        form.handle_key(Key::Digit(0), N);
        form.handle_key(Key::Digit(7), N);
        assert_eq!(form.quantity().text(), "007");
        form.handle_key(Key::Tab, N);
        assert_eq!(form.quantity().text(), "7");
        assert_eq!(form.quantity().value(), 7);
    }

    #[test]
    fn digits_only_edit_the_quantity_field() {
        let mut form = ConfigForm::new(5);
        form.handle_key(Key::Down, N);
        form.handle_key(Key::Digit(9), N);
        assert_eq!(form.quantity().text(), "5");
    }

    #[test]
    fn enter_commits_toggles_and_starts() {
        let mut form = ConfigForm::new(10);
        assert_eq!(form.handle_key(Key::Enter, N), FormAction::Stay);
        assert_eq!(form.focus(), 1);
        assert_eq!(
            form.handle_key(Key::Enter, N),
            FormAction::Toggle(AlgorithmId(0))
        );
        form.handle_key(Key::Right, N);
        form.handle_key(Key::Right, N);
        form.handle_key(Key::Right, N);
        assert_eq!(form.handle_key(Key::Enter, N), FormAction::Start);
    }

    #[test]
    fn shortcuts() {
        let mut form = ConfigForm::new(10);
        assert_eq!(form.handle_key(Key::Help, N), FormAction::Help);
        assert_eq!(form.handle_key(Key::Escape, N), FormAction::Cancel);
        assert_eq!(form.handle_key(Key::Replay, N), FormAction::Stay);
    }

    #[test]
    fn pick_fields() {
        let mut form = ConfigForm::new(10);
        form.handle_key(Key::Digit(0), N);
        assert_eq!(form.pick(2, N), FormAction::Toggle(AlgorithmId(1)));
        assert_eq!(form.quantity().value(), 100);
        assert_eq!(form.focus(), 2);
        assert_eq!(form.pick(0, N), FormAction::Stay);
        assert_eq!(form.focus(), 0);
        assert_eq!(form.pick(N + 1, N), FormAction::Start);
        assert_eq!(form.pick(N + 2, N), FormAction::Stay);
        assert_eq!(form.focus(), N + 1);
    }

    #[test]
    fn empty_registry_has_quantity_and_continue() {
        let mut form = ConfigForm::new(3);
        form.handle_key(Key::Down, 0);
        assert_eq!(form.focused_field(0), FormField::Continue);
        form.handle_key(Key::Down, 0);
        assert_eq!(form.focus(), 1);
        assert_eq!(form.handle_key(Key::Enter, 0), FormAction::Start);
    }
}
