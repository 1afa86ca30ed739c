//! Text input state and widget.
//!
//! Single-line input with a grapheme-aware cursor. The investment amount
//! runs with the numeric filter; name and comment accept free text.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_segmentation::UnicodeSegmentation;

use crate::theme::{ACCENT, SURFACE_0, SURFACE_1, TEXT, TEXT_MUTED};

/// State for a text input.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current text value
    pub value: String,
    /// Cursor position (in graphemes)
    pub cursor: usize,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Restrict typed characters to digits, `.` and `-`
    pub numeric: bool,
}

impl InputState {
    /// Create new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Restrict input to number-shaped characters. The parse still decides
    /// what is actually a number.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Insert a character at the cursor, subject to the numeric filter.
    pub fn insert(&mut self, c: char) {
        if !self.accepts(c) {
            return;
        }
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    /// Insert text at the cursor (for paste). Filtered characters are
    /// silently dropped.
    pub fn insert_str(&mut self, text: &str) {
        let filtered: String = text.chars().filter(|c| self.accepts(*c)).collect();
        if filtered.is_empty() {
            return;
        }
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, &filtered);
        self.cursor += filtered.graphemes(true).count();
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let new_cursor = self.cursor - 1;
            let start_byte = self.grapheme_to_byte_offset(new_cursor);
            let end_byte = self.grapheme_to_byte_offset(self.cursor);
            self.value.replace_range(start_byte..end_byte, "");
            self.cursor = new_cursor;
        }
    }

    /// Delete the grapheme at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.grapheme_count() {
            let start_byte = self.grapheme_to_byte_offset(self.cursor);
            let end_byte = self.grapheme_to_byte_offset(self.cursor + 1);
            self.value.replace_range(start_byte..end_byte, "");
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Replace the whole value and put the cursor at the end.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
    }

    fn accepts(&self, c: char) -> bool {
        !self.numeric || c.is_ascii_digit() || c == '.' || c == '-'
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_to_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}

/// A single-line text input widget.
///
/// Scrolls horizontally so the cursor always stays in view, which matters for
/// the comment field and its 100-character ceiling.
pub struct TextInput<'a> {
    state: &'a InputState,
    focused: bool,
}

impl<'a> TextInput<'a> {
    /// Create a new text input widget.
    pub fn new(state: &'a InputState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    /// Set whether the input is focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }

        let base = if self.focused {
            Style::default().bg(SURFACE_1)
        } else {
            Style::default()
        };
        for col in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((col, area.y)) {
                cell.set_style(base);
            }
        }

        let width = area.width as usize;
        // Window the value so the cursor column is always visible.
        let skip = self.state.cursor.saturating_sub(width.saturating_sub(1));

        if self.state.value.is_empty() {
            let placeholder = self.state.placeholder.as_deref().unwrap_or("");
            let text: String = placeholder.graphemes(true).take(width).collect();
            buf.set_string(area.x, area.y, &text, base.fg(TEXT_MUTED));
        } else {
            let text: String = self
                .state
                .value
                .graphemes(true)
                .skip(skip)
                .take(width)
                .collect();
            buf.set_string(area.x, area.y, &text, base.fg(TEXT));
        }

        if self.focused {
            let cursor_x = area.x + self.state.cursor.saturating_sub(skip) as u16;
            if cursor_x < area.right()
                && let Some(cell) = buf.cell_mut((cursor_x, area.y))
            {
                cell.set_bg(ACCENT).set_fg(SURFACE_0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = InputState::new();
        state.insert('H');
        state.insert('i');
        assert_eq!(state.value, "Hi");
        assert_eq!(state.cursor, 2);

        state.backspace();
        assert_eq!(state.value, "H");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut state = InputState::new();
        state.set_text("Jne");
        state.move_home();
        state.move_right();
        state.insert('a');
        assert_eq!(state.value, "Jane");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_grapheme_aware_editing() {
        let mut state = InputState::new();
        state.set_text("Zoë");
        assert_eq!(state.cursor, 3);
        state.backspace();
        assert_eq!(state.value, "Zo");
    }

    #[test]
    fn test_numeric_filter_rejects_letters() {
        let mut state = InputState::new().numeric();
        state.insert('1');
        state.insert('x');
        state.insert('0');
        state.insert('.');
        state.insert('5');
        assert_eq!(state.value, "10.5");
    }

    #[test]
    fn test_numeric_paste_is_filtered() {
        let mut state = InputState::new().numeric();
        state.insert_str("$1,250.00");
        assert_eq!(state.value, "1250.00");
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut state = InputState::new();
        state.set_text("hello");
        assert_eq!(state.cursor, 5);
        state.set_text("");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_placeholder_is_not_a_value() {
        let state = InputState::new().with_placeholder("Full name");
        assert!(state.value.is_empty());
        assert_eq!(state.placeholder.as_deref(), Some("Full name"));
    }
}
