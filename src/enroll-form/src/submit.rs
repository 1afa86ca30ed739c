//! Submission lifecycle: a small state machine around an injected async
//! collaborator.
//!
//! ```text
//!            request()              accepted
//!   Idle ───────────► Validating ───────────► Submitting
//!     ▲                   │                       │
//!     │     rejected      │                       │  finish()
//!     └───────────────────┴───────────────────────┘
//! ```
//!
//! The controller never talks to a backend itself. A submit request runs
//! validation and hands back a [`SubmitTicket`] when the record is clean; the
//! caller then drives the [`SubmitHandler`] with that ticket, either inline
//! through [`SubmissionController::submit`] or on a spawned task that reports
//! the outcome back later. Either way, exactly one `finish` returns the
//! controller to idle.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::options::FormOptions;
use crate::validate::{ValidationReport, validate_with};
use crate::values::FormValues;

// ============================================================================
// Errors
// ============================================================================

/// Lifecycle errors surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// A reset was attempted while a submission is still running.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

// ============================================================================
// States
// ============================================================================

/// Where the controller currently is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing in flight. The only state in which a submit request is taken.
    #[default]
    Idle,
    /// Validation is running against the current record.
    Validating,
    /// The collaborator has been invoked and has not completed yet.
    Submitting,
}

impl SubmissionState {
    /// Returns true while a submission attempt is underway.
    pub fn is_busy(&self) -> bool {
        !matches!(self, SubmissionState::Idle)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => f.write_str("idle"),
            SubmissionState::Validating => f.write_str("validating"),
            SubmissionState::Submitting => f.write_str("submitting"),
        }
    }
}

// ============================================================================
// Tickets and Outcomes
// ============================================================================

/// Opaque helper context handed to the collaborator with each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitContext {
    /// 1-based counter of accepted submission attempts for this controller.
    pub attempt: u64,
}

/// Permission to run one submission.
///
/// Carries a snapshot of the record taken at acceptance time, so edits made
/// while the collaborator runs cannot leak into the in-flight payload.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub values: FormValues,
    pub context: SubmitContext,
    /// Upper bound on collaborator latency, stamped from the controller.
    pub timeout: Option<Duration>,
}

/// Answer to a submit request.
#[derive(Debug)]
pub enum SubmitRequest {
    /// The record validated clean; run the collaborator with this ticket.
    Accepted(SubmitTicket),
    /// Validation failed; nothing was invoked.
    Rejected(ValidationReport),
    /// A submission is already in flight.
    Busy,
}

/// Final result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The collaborator completed successfully.
    Completed,
    /// The collaborator returned an error. The record is untouched and the
    /// user may retry.
    Failed(anyhow::Error),
    /// Validation rejected the record before the collaborator ran.
    Rejected(ValidationReport),
    /// Refused because a submission was already in flight.
    Busy,
    /// The collaborator outlived the configured timeout and was dropped.
    TimedOut,
}

impl SubmitOutcome {
    /// Returns true only for a successful completion.
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}

// ============================================================================
// Collaborator
// ============================================================================

/// The single external boundary of the form: whatever actually consumes a
/// submitted record.
///
/// Implementations receive the accepted snapshot plus the helper context and
/// may take arbitrarily long. Failure is reported through the returned error
/// and is not interpreted here.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: &FormValues, context: &SubmitContext) -> anyhow::Result<()>;
}

/// Drive a collaborator to completion for one accepted ticket.
///
/// Applies the ticket's timeout if one was stamped; on expiry the collaborator
/// future is dropped, which cancels it. Never returns `Rejected` or `Busy`.
pub async fn run_collaborator(
    ticket: &SubmitTicket,
    handler: &dyn SubmitHandler,
) -> SubmitOutcome {
    let work = handler.submit(&ticket.values, &ticket.context);
    let result = match ticket.timeout {
        Some(limit) => match tokio::time::timeout(limit, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    attempt = ticket.context.attempt,
                    timeout_ms = limit.as_millis() as u64,
                    "submit collaborator timed out"
                );
                return SubmitOutcome::TimedOut;
            }
        },
        None => work.await,
    };
    match result {
        Ok(()) => SubmitOutcome::Completed,
        Err(error) => SubmitOutcome::Failed(error),
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Gatekeeper for the submission lifecycle.
///
/// Owns nothing but its own state: the record to validate is passed in per
/// request, and the collaborator is injected per call.
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    attempts: u64,
    timeout: Option<Duration>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound collaborator latency. Unset by default, which reproduces the
    /// wait-forever behavior of the original demo.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns true while a submission attempt is underway.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Number of accepted submission attempts so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Ask to submit, validating with the full rule set.
    pub fn request(&mut self, values: &FormValues) -> SubmitRequest {
        self.request_with(values, &FormOptions::full())
    }

    /// Ask to submit under a specific form variant.
    ///
    /// Refused with [`SubmitRequest::Busy`] while an earlier attempt is still
    /// running. Otherwise validation runs against `values`; a clean record
    /// moves the controller to `Submitting` and yields a ticket, an unclean
    /// one returns the report and leaves the controller idle.
    pub fn request_with(&mut self, values: &FormValues, options: &FormOptions) -> SubmitRequest {
        if self.state.is_busy() {
            tracing::debug!(state = %self.state, "submit request refused, already in flight");
            return SubmitRequest::Busy;
        }

        self.state = SubmissionState::Validating;
        let report = validate_with(values, options);
        if !report.is_empty() {
            tracing::debug!(errors = report.len(), "submit request rejected by validation");
            self.state = SubmissionState::Idle;
            return SubmitRequest::Rejected(report);
        }

        self.attempts += 1;
        self.state = SubmissionState::Submitting;
        tracing::debug!(attempt = self.attempts, "submit request accepted");
        SubmitRequest::Accepted(SubmitTicket {
            values: values.clone(),
            context: SubmitContext {
                attempt: self.attempts,
            },
            timeout: self.timeout,
        })
    }

    /// Mark the in-flight attempt as finished, whatever its outcome.
    ///
    /// Safe to call from idle; it stays a no-op then.
    pub fn finish(&mut self) {
        if self.state.is_busy() {
            tracing::debug!(attempt = self.attempts, "submission finished, controller idle");
        }
        self.state = SubmissionState::Idle;
    }

    /// One-shot submission with the full rule set.
    pub async fn submit(
        &mut self,
        values: &FormValues,
        handler: &dyn SubmitHandler,
    ) -> SubmitOutcome {
        self.submit_with(values, &FormOptions::full(), handler).await
    }

    /// One-shot submission: request, run the collaborator to completion, and
    /// return to idle.
    ///
    /// This is the whole lifecycle in a single await. Callers that need the
    /// UI to stay live while the collaborator runs use
    /// [`SubmissionController::request_with`] and [`run_collaborator`] on a
    /// task instead, then [`SubmissionController::finish`].
    pub async fn submit_with(
        &mut self,
        values: &FormValues,
        options: &FormOptions,
        handler: &dyn SubmitHandler,
    ) -> SubmitOutcome {
        let ticket = match self.request_with(values, options) {
            SubmitRequest::Accepted(ticket) => ticket,
            SubmitRequest::Rejected(report) => return SubmitOutcome::Rejected(report),
            SubmitRequest::Busy => return SubmitOutcome::Busy,
        };
        let outcome = run_collaborator(&ticket, handler).await;
        self.finish();
        outcome
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use std::sync::atomic::{AtomicU64, Ordering};

    use crate::values::RiskLevel;

    struct CountingHandler {
        calls: AtomicU64,
        fail: bool,
    }

    impl CountingHandler {
        fn new() -> Self {
            Self {
                calls: AtomicU64::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicU64::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubmitHandler for CountingHandler {
        async fn submit(&self, _values: &FormValues, _context: &SubmitContext) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("backend said no");
            }
            Ok(())
        }
    }

    fn valid_record() -> FormValues {
        FormValues {
            full_name: "Jane Doe".into(),
            initial_investment: Some(1000.0),
            investment_risk: [RiskLevel::Low].into_iter().collect(),
            comment_about_investment_risk: "this is a sufficiently long comment".into(),
            dependents: 2,
            accepted_terms_and_conditions: true,
        }
    }

    #[test]
    fn test_controller_starts_idle() {
        let controller = SubmissionController::new();
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(!controller.is_busy());
        assert_eq!(controller.attempts(), 0);
    }

    #[test]
    fn test_invalid_record_is_rejected_without_a_ticket() {
        let mut controller = SubmissionController::new();
        let request = controller.request(&FormValues::default());
        assert_matches!(request, SubmitRequest::Rejected(report) if !report.is_empty());
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(controller.attempts(), 0);
    }

    #[test]
    fn test_accepted_ticket_snapshots_the_record() {
        let mut controller = SubmissionController::new();
        let values = valid_record();
        let request = controller.request(&values);
        let ticket = assert_matches!(request, SubmitRequest::Accepted(ticket) => ticket);
        assert_eq!(ticket.values, values);
        assert_eq!(ticket.context.attempt, 1);
        assert_eq!(controller.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_second_request_while_submitting_is_busy() {
        let mut controller = SubmissionController::new();
        let values = valid_record();
        assert_matches!(controller.request(&values), SubmitRequest::Accepted(_));
        assert_matches!(controller.request(&values), SubmitRequest::Busy);
        controller.finish();
        assert_matches!(controller.request(&values), SubmitRequest::Accepted(_));
        assert_eq!(controller.attempts(), 2);
    }

    #[test]
    fn test_finish_from_idle_is_a_no_op() {
        let mut controller = SubmissionController::new();
        controller.finish();
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(controller.attempts(), 0);
    }

    #[tokio::test]
    async fn test_one_shot_submit_completes_and_returns_to_idle() {
        let mut controller = SubmissionController::new();
        let handler = CountingHandler::new();
        let outcome = controller.submit(&valid_record(), &handler).await;
        assert!(outcome.is_completed());
        assert_eq!(handler.calls(), 1);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_collaborator_failure_still_returns_to_idle() {
        let mut controller = SubmissionController::new();
        let handler = CountingHandler::failing();
        let outcome = controller.submit(&valid_record(), &handler).await;
        assert_matches!(outcome, SubmitOutcome::Failed(_));
        assert_eq!(handler.calls(), 1);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_rejected_submit_never_invokes_the_collaborator() {
        let mut controller = SubmissionController::new();
        let handler = CountingHandler::new();
        let outcome = controller.submit(&FormValues::default(), &handler).await;
        assert_matches!(outcome, SubmitOutcome::Rejected(_));
        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_drops_a_stuck_collaborator() {
        struct StuckHandler;

        #[async_trait]
        impl SubmitHandler for StuckHandler {
            async fn submit(
                &self,
                _values: &FormValues,
                _context: &SubmitContext,
            ) -> anyhow::Result<()> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }

        let mut controller =
            SubmissionController::new().with_timeout(Duration::from_millis(250));
        let outcome = controller.submit(&valid_record(), &StuckHandler).await;
        assert_matches!(outcome, SubmitOutcome::TimedOut);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }
}
