//! Checkbox row widget.
//!
//! Stateless: the checked flag lives in the form record, the widget only
//! draws one row of it.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::theme::{ACCENT, TEXT, TEXT_DIM};

/// A single checkbox row: `> [✓] label`.
#[derive(Debug, Clone)]
pub struct Checkbox<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
}

impl<'a> Checkbox<'a> {
    /// Create an unchecked, unfocused checkbox.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            checked: false,
            focused: false,
        }
    }

    /// Set the checked flag.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the focused flag.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Checkbox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 6 {
            return;
        }

        let marker = if self.checked { "[✓]" } else { "[ ]" };
        let prefix = if self.focused { "> " } else { "  " };
        let style = if self.focused {
            Style::default().fg(ACCENT)
        } else if self.checked {
            Style::default().fg(TEXT)
        } else {
            Style::default().fg(TEXT_DIM)
        };

        let text = format!("{prefix}{marker} {}", self.label);
        buf.set_string(area.x, area.y, &text, style);
    }
}
