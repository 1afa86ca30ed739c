//! Rendering for the New Account screen.
//!
//! The layout is one centered card with every field stacked vertically:
//! a label row, the widget row, then a feedback row that shows either the
//! field's visible error or its static hint. Ctrl+D adds a right-hand
//! column of debug panes with the live errors, touched set, and record.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use enroll_form::{FieldId, RiskLevel};

use crate::app::{App, StatusKind};
use crate::borders::card_block;
use crate::checkbox::Checkbox;
use crate::focus::FocusStop;
use crate::hints::KeyHintsBar;
use crate::input::{InputState, TextInput};
use crate::select::DependentsSelect;
use crate::theme;

/// Outer width of the form card.
const CARD_WIDTH: u16 = 64;
/// Outer height of the form card.
const CARD_HEIGHT: u16 = 24;
/// Width of the debug column when open.
const DEBUG_WIDTH: u16 = 46;

const KEY_HINTS: &[(&str, &str)] = &[
    ("Tab", "Next"),
    ("Space", "Toggle"),
    ("Enter", "Submit"),
    ("^R", "Reset"),
    ("^D", "Debug"),
    ("Esc", "Quit"),
];

const RISK_ROWS: &[(FocusStop, RiskLevel, &str)] = &[
    (FocusStop::RiskHigh, RiskLevel::High, "High-Super Risky"),
    (FocusStop::RiskMedium, RiskLevel::Medium, "Medium-Risky"),
    (FocusStop::RiskLow, RiskLevel::Low, "Low-Safe"),
];

// ============================================================================
// Row Cursor
// ============================================================================

/// Hands out one-row rects top to bottom, stopping at the area edge.
struct RowCursor {
    area: Rect,
    y: u16,
}

impl RowCursor {
    fn new(area: Rect) -> Self {
        Self { area, y: area.y }
    }

    fn take(&mut self) -> Option<Rect> {
        if self.y >= self.area.bottom() || self.area.width == 0 {
            return None;
        }
        let row = Rect::new(self.area.x, self.y, self.area.width, 1);
        self.y += 1;
        Some(row)
    }

    fn skip(&mut self) {
        self.y = self.y.saturating_add(1);
    }
}

// ============================================================================
// View
// ============================================================================

/// Stateless view over the application state.
pub struct NewAccountView<'a> {
    app: &'a App,
}

impl<'a> NewAccountView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn render_label(&self, rows: &mut RowCursor, buf: &mut Buffer, text: &str, focused: bool) {
        let Some(row) = rows.take() else {
            return;
        };
        let style = if focused {
            Style::default().fg(theme::ACCENT_SOFT)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        buf.set_stringn(row.x, row.y, text, row.width as usize, style);
    }

    /// The feedback row shows the visible error, or the static hint when
    /// helper text is enabled, or stays blank.
    fn render_feedback(&self, rows: &mut RowCursor, buf: &mut Buffer, field: FieldId, hint: &str) {
        let Some(row) = rows.take() else {
            return;
        };
        if let Some(error) = self.app.session.visible_error(field) {
            let style = Style::default().fg(theme::ERROR);
            buf.set_stringn(row.x, row.y, error, row.width as usize, style);
        } else if self.app.session.options().helper_text && !hint.is_empty() {
            let style = Style::default().fg(theme::TEXT_MUTED);
            buf.set_stringn(row.x, row.y, hint, row.width as usize, style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_text_field(
        &self,
        rows: &mut RowCursor,
        buf: &mut Buffer,
        label: &str,
        state: &InputState,
        stop: FocusStop,
        field: FieldId,
        hint: &str,
    ) {
        let focused = self.app.focus.is_focused(stop);
        self.render_label(rows, buf, label, focused);
        if let Some(row) = rows.take() {
            TextInput::new(state).focused(focused).render(row, buf);
        }
        self.render_feedback(rows, buf, field, hint);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let card = centered(area, CARD_WIDTH, CARD_HEIGHT);
        let block = card_block("New Account", true);
        let inner = block.inner(card);
        block.render(card, buf);

        let values = self.app.session.values();
        let mut rows = RowCursor::new(inner);

        self.render_text_field(
            &mut rows,
            buf,
            "Full name",
            &self.app.name_input,
            FocusStop::FullName,
            FieldId::FullName,
            "2 to 100 characters",
        );
        self.render_text_field(
            &mut rows,
            buf,
            "Initial investment",
            &self.app.investment_input,
            FocusStop::InitialInvestment,
            FieldId::InitialInvestment,
            "Minimum investment is 100",
        );

        let risk_focused = RISK_ROWS
            .iter()
            .any(|(stop, _, _)| self.app.focus.is_focused(*stop));
        self.render_label(&mut rows, buf, "Select the risk you want to take:", risk_focused);
        for (stop, level, label) in RISK_ROWS {
            if let Some(row) = rows.take() {
                Checkbox::new(label)
                    .checked(values.investment_risk.contains(level))
                    .focused(self.app.focus.is_focused(*stop))
                    .render(row, buf);
            }
        }
        self.render_feedback(
            &mut rows,
            buf,
            FieldId::InvestmentRisk,
            "Pick at least one risk level",
        );

        self.render_text_field(
            &mut rows,
            buf,
            "Comment about investment risk",
            &self.app.comment_input,
            FocusStop::Comment,
            FieldId::CommentAboutInvestmentRisk,
            "20 to 100 characters",
        );

        let dependents_focused = self.app.focus.is_focused(FocusStop::Dependents);
        self.render_label(&mut rows, buf, "Dependents", dependents_focused);
        if let Some(row) = rows.take() {
            DependentsSelect::new(values.dependents)
                .focused(dependents_focused)
                .render(row, buf);
        }
        self.render_feedback(&mut rows, buf, FieldId::Dependents, "0 to 5 dependents");

        if let Some(row) = rows.take() {
            Checkbox::new("Accept terms and conditions")
                .checked(values.accepted_terms_and_conditions)
                .focused(self.app.focus.is_focused(FocusStop::Terms))
                .render(row, buf);
        }
        self.render_feedback(&mut rows, buf, FieldId::AcceptedTermsAndConditions, "");

        rows.skip();
        if let Some(row) = rows.take() {
            self.render_submit_row(row, buf);
        }
        if let Some(row) = rows.take()
            && let Some(status) = self.app.status.as_ref()
        {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(theme::TEXT_DIM),
                StatusKind::Success => Style::default().fg(theme::SUCCESS),
                StatusKind::Warning => Style::default().fg(theme::WARNING),
                StatusKind::Error => Style::default().fg(theme::ERROR),
            };
            buf.set_stringn(row.x, row.y, &status.text, row.width as usize, style);
        }
    }

    fn render_submit_row(&self, row: Rect, buf: &mut Buffer) {
        if self.app.session.is_busy() {
            (&self.app.spinner).render(row, buf);
        } else {
            let style = if self.app.focus.is_focused(FocusStop::Submit) {
                Style::default().fg(theme::SURFACE_0).bg(theme::ACCENT)
            } else {
                Style::default().fg(theme::TEXT).bg(theme::SURFACE_1)
            };
            buf.set_stringn(row.x, row.y, "[ Submit ]", row.width as usize, style);
        }
    }

    fn render_debug(&self, area: Rect, buf: &mut Buffer) {
        let [errors_area, touched_area, values_area] = Layout::vertical([
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Percentage(45),
        ])
        .areas(area);

        let session = &self.app.session;
        let errors = serde_json::to_string_pretty(session.report()).unwrap_or_default();
        let touched: Vec<&str> = FieldId::ALL
            .iter()
            .filter(|field| session.is_touched(**field))
            .map(|field| field.as_str())
            .collect();
        let touched = serde_json::to_string_pretty(&touched).unwrap_or_default();
        let values = serde_json::to_string_pretty(session.values()).unwrap_or_default();

        render_debug_pane(errors_area, buf, "errors", &errors);
        render_debug_pane(touched_area, buf, "touched", &touched);
        render_debug_pane(values_area, buf, "values", &values);
    }
}

impl Widget for NewAccountView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(theme::SURFACE_0))
            .render(area, buf);

        let [body, hints_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        if body.width < 40 || body.height < 10 {
            let message = "Terminal too small for the form";
            let style = Style::default().fg(theme::WARNING);
            buf.set_stringn(body.x, body.y, message, body.width as usize, style);
            return;
        }

        let show_debug = self.app.show_debug && body.width >= CARD_WIDTH + DEBUG_WIDTH + 4;
        if show_debug {
            let [form_area, debug_area] =
                Layout::horizontal([Constraint::Min(CARD_WIDTH), Constraint::Length(DEBUG_WIDTH)])
                    .areas(body);
            self.render_form(form_area, buf);
            self.render_debug(debug_area, buf);
        } else {
            self.render_form(body, buf);
        }

        KeyHintsBar::from_tuples(KEY_HINTS).render(hints_area, buf);
    }
}

fn render_debug_pane(area: Rect, buf: &mut Buffer, title: &str, body: &str) {
    let block = card_block(title, false);
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(body)
        .style(Style::default().fg(theme::TEXT_DIM))
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

// ============================================================================
// Tests
// ============================================================================
