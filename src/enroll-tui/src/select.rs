//! Dependents selector.
//!
//! A compact cycling select: Left and Right step through the menu options,
//! wrapping at both ends.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use enroll_form::DEPENDENTS_UNSET;

use crate::theme::{ACCENT, TEXT, TEXT_DIM, TEXT_MUTED};

/// Menu options in display order. The numbers are deliberately not sorted;
/// this is the order the menu has always shipped with.
pub const DEPENDENT_OPTIONS: [(i32, &str); 7] = [
    (DEPENDENTS_UNSET, "Select ..."),
    (3, "3"),
    (2, "2"),
    (0, "0"),
    (4, "4"),
    (5, "5"),
    (1, "1"),
];

fn position(value: i32) -> usize {
    DEPENDENT_OPTIONS
        .iter()
        .position(|(option, _)| *option == value)
        .unwrap_or(0)
}

/// The label shown for a dependents value.
pub fn label_for(value: i32) -> &'static str {
    DEPENDENT_OPTIONS[position(value)].1
}

/// The value one step to the right, wrapping.
pub fn next_value(value: i32) -> i32 {
    let index = (position(value) + 1) % DEPENDENT_OPTIONS.len();
    DEPENDENT_OPTIONS[index].0
}

/// The value one step to the left, wrapping.
pub fn prev_value(value: i32) -> i32 {
    let index = position(value)
        .checked_sub(1)
        .unwrap_or(DEPENDENT_OPTIONS.len() - 1);
    DEPENDENT_OPTIONS[index].0
}

/// Rendered as `◂ label ▸`, arrows lit while focused.
#[derive(Debug, Clone)]
pub struct DependentsSelect {
    value: i32,
    focused: bool,
}

impl DependentsSelect {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            focused: false,
        }
    }

    /// Set the focused flag.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for DependentsSelect {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 8 {
            return;
        }

        let arrow_style = if self.focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let label_style = if self.value == DEPENDENTS_UNSET {
            Style::default().fg(TEXT_MUTED)
        } else if self.focused {
            Style::default().fg(TEXT)
        } else {
            Style::default().fg(TEXT_DIM)
        };

        let mut x = area.x;
        buf.set_string(x, area.y, "◂ ", arrow_style);
        x += 2;
        let label = label_for(self.value);
        buf.set_string(x, area.y, label, label_style);
        x += label.len() as u16;
        buf.set_string(x, area.y, " ▸", arrow_style);
    }
}
