//! Main event loop for the form screen.
//!
//! Input events, timer ticks, and collaborator completions all funnel
//! through one select loop. Submissions run on a spawned task so the
//! screen keeps rendering while the collaborator works; the outcome
//! comes back over a channel and is folded into the session.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use enroll_form::{FormSession, FormValues, SubmitHandler, SubmitOutcome, run_collaborator};

use crate::app::{App, AppAction};
use crate::terminal::EnrollTerminal;
use crate::view::NewAccountView;

/// Spinner animation cadence.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Information about how the session ended.
#[derive(Debug)]
pub struct AppExitInfo {
    /// Record from the last completed submission, if any.
    pub submitted: Option<FormValues>,
    /// Accepted submission attempts during the session.
    pub attempts: u64,
}

/// Drives the form screen until the user leaves.
pub struct EventLoop {
    app: App,
    handler: Arc<dyn SubmitHandler>,
}

impl EventLoop {
    pub fn new(session: FormSession, handler: Arc<dyn SubmitHandler>) -> Self {
        Self {
            app: App::new(session),
            handler,
        }
    }

    pub async fn run(&mut self, terminal: &mut EnrollTerminal) -> Result<AppExitInfo> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<SubmitOutcome>(1);

        self.render(terminal)?;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match self.handle_event(event) {
                            AppAction::Continue => {}
                            AppAction::StartSubmit(ticket) => {
                                let handler = Arc::clone(&self.handler);
                                let tx = outcome_tx.clone();
                                tokio::spawn(async move {
                                    let outcome =
                                        run_collaborator(&ticket, handler.as_ref()).await;
                                    let _ = tx.send(outcome).await;
                                });
                            }
                            AppAction::Quit => break,
                        },
                        Some(Err(error)) => {
                            tracing::error!("terminal event error: {error}");
                        }
                        // Input stream closed, nothing left to drive the UI.
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    self.app.tick();
                }
                Some(outcome) = outcome_rx.recv() => {
                    self.app.on_submit_finished(outcome);
                }
            }
            self.render(terminal)?;
        }

        Ok(AppExitInfo {
            submitted: self.app.submitted.take(),
            attempts: self.app.session.attempts(),
        })
    }

    fn handle_event(&mut self, event: Event) -> AppAction {
        match event {
            // Key releases show up on some platforms; only presses count.
            Event::Key(key) if key.kind != KeyEventKind::Release => self.app.handle_key(key),
            Event::Paste(text) => {
                self.app.handle_paste(&text);
                AppAction::Continue
            }
            _ => AppAction::Continue,
        }
    }

    fn render(&self, terminal: &mut EnrollTerminal) -> Result<()> {
        terminal.draw(|frame| {
            frame.render_widget(NewAccountView::new(&self.app), frame.area());
        })
    }
}

/// Set up a terminal, run the form screen, and restore the terminal.
pub async fn run(session: FormSession, handler: Arc<dyn SubmitHandler>) -> Result<AppExitInfo> {
    let mut terminal = EnrollTerminal::new()?;
    let mut event_loop = EventLoop::new(session, handler);
    event_loop.run(&mut terminal).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use enroll_form::FormOptions;

    use crate::simulate::SimulatedSubmit;

    fn event_loop() -> EventLoop {
        let session = FormSession::new(FormOptions::full());
        let handler: Arc<dyn SubmitHandler> = Arc::new(SimulatedSubmit::new(Duration::ZERO));
        EventLoop::new(session, handler)
    }

    #[test]
    fn test_key_releases_are_ignored() {
        let mut event_loop = event_loop();

        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        event_loop.handle_event(Event::Key(release));
        assert_eq!(event_loop.app.session.values().full_name, "");

        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event_loop.handle_event(Event::Key(press));
        assert_eq!(event_loop.app.session.values().full_name, "a");
    }

    #[test]
    fn test_paste_events_reach_the_focused_input() {
        let mut event_loop = event_loop();
        event_loop.handle_event(Event::Paste("Jane Doe".to_string()));
        assert_eq!(event_loop.app.session.values().full_name, "Jane Doe");
    }
}
