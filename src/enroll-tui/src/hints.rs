//! Key hints bar.
//!
//! One-line bar of keyboard shortcuts at the bottom of the screen:
//! `Tab Next · Space Toggle · Enter Submit`

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme::{ACCENT_SOFT, SURFACE_1, TEXT_DIM};

/// A single key hint (key + description).
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub description: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// A horizontal bar of key hints.
pub struct KeyHintsBar {
    hints: Vec<KeyHint>,
    separator: String,
}

impl KeyHintsBar {
    /// Create from (key, description) tuples.
    pub fn from_tuples(hints: &[(&str, &str)]) -> Self {
        Self {
            hints: hints
                .iter()
                .map(|(key, description)| KeyHint::new(*key, *description))
                .collect(),
            separator: " · ".to_string(),
        }
    }

    /// Hints that fit within `max_width`, dropped from the right.
    fn hints_that_fit(&self, max_width: usize) -> Vec<&KeyHint> {
        let mut result = Vec::new();
        let mut used = 0;
        for hint in &self.hints {
            let hint_width = hint.key.width() + 1 + hint.description.width();
            let needed = if result.is_empty() {
                hint_width
            } else {
                self.separator.width() + hint_width
            };
            if used + needed > max_width {
                break;
            }
            result.push(hint);
            used += needed;
        }
        result
    }
}

impl Widget for KeyHintsBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 10 {
            return;
        }

        let bg = Style::default().bg(SURFACE_1);
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(bg);
            }
        }

        let key_style = bg.fg(ACCENT_SOFT);
        let desc_style = bg.fg(TEXT_DIM);

        let mut x = area.x + 1;
        let mut put = |x: &mut u16, text: &str, style: Style| {
            for ch in text.chars() {
                if *x >= area.right() {
                    return;
                }
                if let Some(cell) = buf.cell_mut((*x, area.y)) {
                    cell.set_char(ch).set_style(style);
                }
                *x += 1;
            }
        };

        // The bar starts one cell in, so one cell less is available.
        let available = area.width.saturating_sub(1) as usize;
        for (i, hint) in self.hints_that_fit(available).iter().enumerate() {
            if i > 0 {
                put(&mut x, &self.separator, desc_style);
            }
            put(&mut x, &hint.key, key_style);
            put(&mut x, " ", desc_style);
            put(&mut x, &hint.description, desc_style);
        }
    }
}
