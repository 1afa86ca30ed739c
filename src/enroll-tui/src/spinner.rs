//! Submission spinner.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::theme::{ACCENT, TEXT_DIM};

/// Braille dots animation frames.
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A small animated spinner shown while a submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitSpinner {
    frame: usize,
    label: Option<String>,
}

impl SubmitSpinner {
    /// Create a spinner at the first frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label drawn after the spinner glyph.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Restart the animation from the first frame.
    pub fn restart(&mut self) {
        self.frame = 0;
    }

    /// Get the current frame glyph.
    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}

impl Widget for &SubmitSpinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }

        buf.set_string(
            area.x,
            area.y,
            self.current_frame(),
            Style::default().fg(ACCENT),
        );

        if let Some(label) = &self.label
            && area.width > 3
        {
            buf.set_string(area.x + 2, area.y, label, Style::default().fg(TEXT_DIM));
        }
    }
}
