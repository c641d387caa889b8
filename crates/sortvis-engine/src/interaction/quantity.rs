//! The editable dataset-size field.

/// Decimal text with a cursor, plus its last committed value.
///
/// Text is re-parsed on every commit point (leaving the field, deleting a
/// character, starting a run). Empty text commits as `0`; text that does
/// not fit a `u32` also commits as `0`, with a warning. After a commit the
/// text is the canonical form of the value, so leading zeros disappear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantityField {
    text: String,
    cursor: usize,
    value: u32,
}

impl QuantityField {
    /// Field showing `value`, cursor at the end.
    pub fn new(value: u32) -> Self {
        let text = value.to_string();
        Self {
            cursor: text.len(),
            text,
            value,
        }
    }

    /// Current text, possibly uncommitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position, in characters from the left.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last committed value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Whether the cursor sits after the last character.
    pub fn at_end(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// Insert `digit` at the cursor. Values above 9 are ignored.
    pub fn insert_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        self.text.insert(self.cursor, char::from(b'0' + digit));
        self.cursor += 1;
    }

    /// Remove the character before the cursor, then re-parse.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
        self.commit();
    }

    /// Remove the character under the cursor, then re-parse.
    pub fn delete(&mut self) {
        if self.at_end() {
            return;
        }
        self.text.remove(self.cursor);
        self.commit();
    }

    /// Move the cursor one character left, stopping at the start.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right, stopping at the end.
    pub fn cursor_right(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    /// Put the cursor after the last character.
    pub fn cursor_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Parse and normalize the text, returning the committed value.
    pub fn commit(&mut self) -> u32 {
        self.value = if self.text.is_empty() {
            0
        } else {
            match self.text.parse::<u32>() {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(text = %self.text, error = %e, "quantity reset to 0");
                    0
                }
            }
        };
        self.text = self.value.to_string();
        self.cursor = self.cursor.min(self.text.len());
        self.value
    }
}

impl Default for QuantityField {
    fn default() -> Self {
        Self::new(0)
    }
}
