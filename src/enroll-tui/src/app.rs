//! Application state and key dispatch for the form screen.
//!
//! [`App`] wraps the headless [`FormSession`] with everything terminal-bound:
//! focus, text editor states, the spinner, the status line, and the debug
//! panes toggle. Key handling returns an [`AppAction`] so the event loop
//! decides when to spawn the collaborator task or leave.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use enroll_form::{
    FieldEdit, FormSession, FormValues, RiskLevel, SubmitOutcome, SubmitRequest, SubmitTicket,
};

use crate::focus::{FocusCycle, FocusDirection, FocusStop};
use crate::input::InputState;
use crate::select;
use crate::spinner::SubmitSpinner;

// ============================================================================
// Status Line
// ============================================================================

/// Severity of the status line under the submit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One-line message under the submit row.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// What the event loop should do after handling one input event.
#[derive(Debug)]
pub enum AppAction {
    /// Nothing beyond a redraw.
    Continue,
    /// Run this accepted ticket on a collaborator task.
    StartSubmit(SubmitTicket),
    /// Leave the application.
    Quit,
}

// ============================================================================
// App State
// ============================================================================

/// Top-level state for the form screen.
pub struct App {
    /// Headless form engine.
    pub session: FormSession,
    /// Which element has keyboard focus.
    pub focus: FocusCycle,
    /// Editor state for the name field.
    pub name_input: InputState,
    /// Editor state for the investment amount.
    pub investment_input: InputState,
    /// Editor state for the risk comment.
    pub comment_input: InputState,
    /// Spinner shown while a submission is in flight.
    pub spinner: SubmitSpinner,
    /// One-line status under the submit row.
    pub status: Option<StatusMessage>,
    /// Show the errors/values debug panes.
    pub show_debug: bool,
    /// Record from the last completed submission, for the exit summary.
    pub submitted: Option<FormValues>,
    /// Snapshot currently with the collaborator.
    in_flight: Option<FormValues>,
}

impl App {
    pub fn new(session: FormSession) -> Self {
        let mut app = Self {
            session,
            focus: FocusCycle::new(),
            name_input: InputState::new().with_placeholder("Full name"),
            investment_input: InputState::new()
                .numeric()
                .with_placeholder("Initial investment"),
            comment_input: InputState::new().with_placeholder("Comment about investment risk"),
            spinner: SubmitSpinner::new().with_label("Submitting..."),
            status: None,
            show_debug: false,
            submitted: None,
            in_flight: None,
        };
        app.sync_inputs();
        app
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return AppAction::Quit,
                KeyCode::Char('d') => {
                    self.show_debug = !self.show_debug;
                    return AppAction::Continue;
                }
                KeyCode::Char('r') => {
                    self.reset();
                    return AppAction::Continue;
                }
                KeyCode::Char('u') => {
                    let Some(input) = self.active_input_mut() else {
                        return AppAction::Continue;
                    };
                    input.clear();
                    self.commit_text();
                    return AppAction::Continue;
                }
                // Swallow other control chords so they never reach the inputs.
                _ => return AppAction::Continue,
            }
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Tab => {
                self.move_focus(FocusDirection::Forward);
                return AppAction::Continue;
            }
            KeyCode::BackTab => {
                self.move_focus(FocusDirection::Backward);
                return AppAction::Continue;
            }
            KeyCode::Down => {
                self.move_focus(FocusDirection::Forward);
                return AppAction::Continue;
            }
            KeyCode::Up => {
                self.move_focus(FocusDirection::Backward);
                return AppAction::Continue;
            }
            KeyCode::Enter => return self.activate(),
            _ => {}
        }

        match self.focus.current() {
            FocusStop::FullName | FocusStop::InitialInvestment | FocusStop::Comment => {
                self.handle_text_key(key);
            }
            FocusStop::RiskHigh | FocusStop::RiskMedium | FocusStop::RiskLow => {
                if key.code == KeyCode::Char(' ')
                    && let Some(level) = self.focus.current().risk_level()
                {
                    self.toggle_risk(level);
                }
            }
            FocusStop::Dependents => match key.code {
                KeyCode::Left => self.cycle_dependents(false),
                KeyCode::Right => self.cycle_dependents(true),
                _ => {}
            },
            FocusStop::Terms => {
                if key.code == KeyCode::Char(' ') {
                    self.toggle_terms();
                }
            }
            FocusStop::Submit => {
                if key.code == KeyCode::Char(' ') {
                    return self.request_submit();
                }
            }
        }
        AppAction::Continue
    }

    /// Route pasted text into the focused input, flattened to one line.
    pub fn handle_paste(&mut self, text: &str) {
        let cleaned = text.replace(['\r', '\n'], " ");
        let Some(input) = self.active_input_mut() else {
            return;
        };
        input.insert_str(&cleaned);
        self.commit_text();
    }

    /// Advance animations. Called on every timer tick.
    pub fn tick(&mut self) {
        if self.session.is_busy() {
            self.spinner.tick();
        }
    }

    /// Fold a finished collaborator run back into the session.
    pub fn on_submit_finished(&mut self, outcome: SubmitOutcome) {
        self.session.finish_submit();
        match outcome {
            SubmitOutcome::Completed => {
                self.submitted = self.in_flight.take();
                self.status = Some(StatusMessage::success("Submitted. Thank you!"));
            }
            SubmitOutcome::Failed(error) => {
                self.in_flight = None;
                self.status = Some(StatusMessage::error(format!("Submission failed: {error:#}")));
            }
            SubmitOutcome::TimedOut => {
                self.in_flight = None;
                self.status = Some(StatusMessage::warning(
                    "Submission timed out, please try again",
                ));
            }
            // A spawned collaborator run can only complete, fail, or time out.
            SubmitOutcome::Rejected(_) | SubmitOutcome::Busy => {
                self.in_flight = None;
            }
        }
    }

    // ========================================================================
    // Key handling helpers
    // ========================================================================

    fn activate(&mut self) -> AppAction {
        if self.focus.current() == FocusStop::Submit {
            self.request_submit()
        } else {
            self.move_focus(FocusDirection::Forward);
            AppAction::Continue
        }
    }

    fn move_focus(&mut self, direction: FocusDirection) {
        // Leaving a field counts as a blur.
        if let Some(field) = self.focus.current().field() {
            self.session.mark_touched(field);
        }
        self.focus.move_focus(direction);
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let mutated = {
            let Some(input) = self.active_input_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char(c) => {
                    input.insert(c);
                    true
                }
                KeyCode::Backspace => {
                    input.backspace();
                    true
                }
                KeyCode::Delete => {
                    input.delete();
                    true
                }
                KeyCode::Left => {
                    input.move_left();
                    false
                }
                KeyCode::Right => {
                    input.move_right();
                    false
                }
                KeyCode::Home => {
                    input.move_home();
                    false
                }
                KeyCode::End => {
                    input.move_end();
                    false
                }
                _ => false,
            }
        };
        if mutated {
            self.commit_text();
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus.current() {
            FocusStop::FullName => Some(&mut self.name_input),
            FocusStop::InitialInvestment => Some(&mut self.investment_input),
            FocusStop::Comment => Some(&mut self.comment_input),
            _ => None,
        }
    }

    /// Push the focused editor's text into the session.
    fn commit_text(&mut self) {
        match self.focus.current() {
            FocusStop::FullName => {
                self.session
                    .set_field(FieldEdit::FullName(self.name_input.value.clone()));
            }
            FocusStop::InitialInvestment => {
                self.session.set_field(FieldEdit::InitialInvestment(
                    parse_investment(&self.investment_input.value),
                ));
            }
            FocusStop::Comment => {
                self.session.set_field(FieldEdit::CommentAboutInvestmentRisk(
                    self.comment_input.value.clone(),
                ));
            }
            _ => {}
        }
    }

    fn toggle_risk(&mut self, level: RiskLevel) {
        let mut set = self.session.values().investment_risk.clone();
        if !set.remove(&level) {
            set.insert(level);
        }
        self.session.set_field(FieldEdit::InvestmentRisk(set));
    }

    fn toggle_terms(&mut self) {
        let accepted = self.session.values().accepted_terms_and_conditions;
        self.session
            .set_field(FieldEdit::AcceptedTermsAndConditions(!accepted));
    }

    fn cycle_dependents(&mut self, forward: bool) {
        let current = self.session.values().dependents;
        let next = if forward {
            select::next_value(current)
        } else {
            select::prev_value(current)
        };
        self.session.set_field(FieldEdit::Dependents(next));
    }

    fn request_submit(&mut self) -> AppAction {
        match self.session.request_submit() {
            SubmitRequest::Accepted(ticket) => {
                self.in_flight = Some(ticket.values.clone());
                self.spinner.restart();
                self.status = Some(StatusMessage::info("Submitting..."));
                AppAction::StartSubmit(ticket)
            }
            SubmitRequest::Rejected(report) => {
                let plural = if report.len() == 1 { "" } else { "s" };
                self.status = Some(StatusMessage::error(format!(
                    "{} field{plural} need attention",
                    report.len()
                )));
                AppAction::Continue
            }
            SubmitRequest::Busy => {
                self.status = Some(StatusMessage::warning("A submission is already running"));
                AppAction::Continue
            }
        }
    }

    fn reset(&mut self) {
        match self.session.reset() {
            Ok(()) => {
                self.sync_inputs();
                self.focus.first();
                self.status = Some(StatusMessage::info("Form reset"));
            }
            Err(error) => {
                self.status = Some(StatusMessage::warning(error.to_string()));
            }
        }
    }

    /// Mirror the session record into the text editor states.
    fn sync_inputs(&mut self) {
        let values = self.session.values();
        let name = values.full_name.clone();
        let investment = format_investment(values.initial_investment);
        let comment = values.comment_about_investment_risk.clone();
        self.name_input.set_text(name);
        self.investment_input.set_text(investment);
        self.comment_input.set_text(comment);
    }
}

fn parse_investment(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn format_investment(amount: Option<f64>) -> String {
    match amount {
        None => String::new(),
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => value.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use enroll_form::{FieldId, FormOptions};

    fn app() -> App {
        App::new(FormSession::new(FormOptions::full()))
    }

    fn press(app: &mut App, code: KeyCode) -> AppAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_ctrl(app: &mut App, c: char) -> AppAction {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_valid(app: &mut App) {
        type_text(app, "Jane Doe"); // FullName
        press(app, KeyCode::Tab);
        type_text(app, "1000"); // InitialInvestment
        press(app, KeyCode::Tab);
        press(app, KeyCode::Tab); // skip RiskHigh
        press(app, KeyCode::Tab); // skip RiskMedium
        press(app, KeyCode::Char(' ')); // toggle RiskLow
        press(app, KeyCode::Tab);
        type_text(app, "this is a sufficiently long comment");
        press(app, KeyCode::Tab);
        press(app, KeyCode::Right); // dependents: Select ... -> 3
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char(' ')); // accept terms
    }

    #[test]
    fn test_typing_updates_session_and_touches_field() {
        let mut app = app();
        type_text(&mut app, "Jo");
        assert_eq!(app.session.values().full_name, "Jo");
        assert!(app.session.is_touched(FieldId::FullName));
    }

    #[test]
    fn test_tab_blurs_the_field_it_leaves() {
        let mut app = app();
        assert!(!app.session.is_touched(FieldId::FullName));
        press(&mut app, KeyCode::Tab);
        assert!(app.session.is_touched(FieldId::FullName));
        assert_eq!(app.focus.current(), FocusStop::InitialInvestment);
    }

    #[test]
    fn test_investment_input_parses_into_the_record() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "250.5x"); // the x is filtered out
        assert_eq!(app.session.values().initial_investment, Some(250.5));
    }

    #[test]
    fn test_space_toggles_risk_checkboxes() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab); // RiskHigh
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.values().investment_risk.contains(&RiskLevel::High));

        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.values().investment_risk.is_empty());
    }

    #[test]
    fn test_dependents_cycles_in_menu_order() {
        let mut app = app();
        for _ in 0..6 {
            press(&mut app, KeyCode::Tab); // reach Dependents
        }
        assert_eq!(app.focus.current(), FocusStop::Dependents);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.values().dependents, 3);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.values().dependents, 2);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.values().dependents, 3);
    }

    #[test]
    fn test_enter_advances_and_submits_from_the_button() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus.current(), FocusStop::InitialInvestment);

        for _ in 0..7 {
            press(&mut app, KeyCode::Tab); // reach Submit
        }
        assert_eq!(app.focus.current(), FocusStop::Submit);
        let action = press(&mut app, KeyCode::Enter);
        // Empty form: rejected, no ticket.
        assert_matches!(action, AppAction::Continue);
        assert_matches!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
        assert!(app.session.is_touched(FieldId::AcceptedTermsAndConditions));
    }

    #[test]
    fn test_valid_form_yields_a_submit_ticket() {
        let mut app = app();
        fill_valid(&mut app);
        press(&mut app, KeyCode::Tab); // Terms -> Submit
        assert_eq!(app.focus.current(), FocusStop::Submit);

        let action = press(&mut app, KeyCode::Enter);
        let ticket = assert_matches!(action, AppAction::StartSubmit(ticket) => ticket);
        assert_eq!(ticket.values.full_name, "Jane Doe");
        assert_eq!(ticket.values.dependents, 3);
        assert!(app.session.is_busy());
    }

    #[test]
    fn test_completed_submission_records_the_snapshot() {
        let mut app = app();
        fill_valid(&mut app);
        press(&mut app, KeyCode::Tab);
        let action = press(&mut app, KeyCode::Enter);
        assert_matches!(action, AppAction::StartSubmit(_));

        app.on_submit_finished(SubmitOutcome::Completed);
        assert!(!app.session.is_busy());
        assert_eq!(
            app.submitted.as_ref().map(|values| values.full_name.as_str()),
            Some("Jane Doe")
        );
        assert_matches!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Success));
    }

    #[test]
    fn test_reset_refused_while_submitting() {
        let mut app = app();
        fill_valid(&mut app);
        press(&mut app, KeyCode::Tab);
        assert_matches!(press(&mut app, KeyCode::Enter), AppAction::StartSubmit(_));

        press_ctrl(&mut app, 'r');
        assert_eq!(app.session.values().full_name, "Jane Doe");
        assert_matches!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Warning));

        app.on_submit_finished(SubmitOutcome::Completed);
        press_ctrl(&mut app, 'r');
        assert_eq!(app.session.values().full_name, "");
        assert_eq!(app.name_input.value, "");
        assert_eq!(app.focus.current(), FocusStop::FullName);
    }

    #[test]
    fn test_debug_panes_toggle() {
        let mut app = app();
        assert!(!app.show_debug);
        press_ctrl(&mut app, 'd');
        assert!(app.show_debug);
        press_ctrl(&mut app, 'd');
        assert!(!app.show_debug);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_matches!(press(&mut app, KeyCode::Esc), AppAction::Quit);
        assert_matches!(press_ctrl(&mut app, 'c'), AppAction::Quit);
    }

    #[test]
    fn test_paste_lands_in_the_focused_input() {
        let mut app = app();
        app.handle_paste("Jane\nDoe");
        assert_eq!(app.session.values().full_name, "Jane Doe");
    }

    #[test]
    fn test_format_investment_round_trip() {
        assert_eq!(format_investment(None), "");
        assert_eq!(format_investment(Some(1000.0)), "1000");
        assert_eq!(format_investment(Some(99.9)), "99.9");
        assert_eq!(parse_investment(""), None);
        assert_eq!(parse_investment("250"), Some(250.0));
        assert_eq!(parse_investment("."), None);
    }
}
