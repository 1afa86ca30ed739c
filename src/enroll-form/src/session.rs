//! One form session behind a single facade.
//!
//! [`FormSession`] owns the field store, the touched set, the latest
//! validation report, and the submission controller, and keeps them
//! consistent: every edit re-validates, a submit attempt touches the whole
//! form, and reset is refused while a submission is in flight.

use std::time::Duration;

use crate::options::FormOptions;
use crate::submit::{
    FormError, SubmissionController, SubmissionState, SubmitHandler, SubmitOutcome, SubmitRequest,
};
use crate::touched::TouchedSet;
use crate::validate::{ValidationReport, validate_with};
use crate::values::{FieldEdit, FieldId, FieldStore, FormValues};

/// Live state of one New Account form.
#[derive(Debug)]
pub struct FormSession {
    store: FieldStore,
    touched: TouchedSet,
    controller: SubmissionController,
    options: FormOptions,
    report: ValidationReport,
}

impl FormSession {
    /// Start a session from the documented initial record.
    pub fn new(options: FormOptions) -> Self {
        Self::with_initial(FormValues::default(), options)
    }

    /// Start a session from a caller-supplied record. `reset` will restore
    /// exactly this record.
    pub fn with_initial(initial: FormValues, options: FormOptions) -> Self {
        let store = FieldStore::new(initial);
        let report = validate_with(store.snapshot(), &options);
        Self {
            store,
            touched: TouchedSet::new(),
            controller: SubmissionController::new(),
            options,
            report,
        }
    }

    /// Bound collaborator latency for every submit attempt.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.controller = self.controller.with_timeout(timeout);
        self
    }

    /// The variant this session runs.
    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Current record.
    pub fn values(&self) -> &FormValues {
        self.store.snapshot()
    }

    /// Latest validation report. Recomputed on every edit, so it is never
    /// stale with respect to [`FormSession::values`].
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Current submission lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Returns true while a submission attempt is underway.
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Number of accepted submission attempts so far.
    pub fn attempts(&self) -> u64 {
        self.controller.attempts()
    }

    /// Apply one field edit: store the value, mark the field touched, and
    /// re-validate the whole record.
    pub fn set_field(&mut self, edit: FieldEdit) {
        let field = edit.field();
        self.store.set(edit);
        self.touched.mark(field);
        self.revalidate();
    }

    /// Record a blur-style interaction without changing the value.
    pub fn mark_touched(&mut self, field: FieldId) {
        self.touched.mark(field);
    }

    /// Returns true if the user has interacted with `field`.
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched.is_touched(field)
    }

    /// The error to surface beside `field`, gated on touched state.
    ///
    /// Untouched fields never show their errors, however invalid they are.
    pub fn visible_error(&self, field: FieldId) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.report.error(field)
        } else {
            None
        }
    }

    /// Restore the initial record and forget all touched state.
    ///
    /// Refused while a submission is in flight; the in-flight snapshot must
    /// not be pulled out from under the collaborator.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.controller.is_busy() {
            return Err(FormError::SubmissionInFlight);
        }
        self.store.reset();
        self.touched.reset();
        self.revalidate();
        Ok(())
    }

    /// Ask to submit the current record.
    ///
    /// A non-busy attempt counts as touching every field, so errors on fields
    /// the user never reached become visible alongside the rejection.
    pub fn request_submit(&mut self) -> SubmitRequest {
        if self.controller.is_busy() {
            return SubmitRequest::Busy;
        }
        self.touched.mark_all();
        let request = self
            .controller
            .request_with(self.store.snapshot(), &self.options);
        if let SubmitRequest::Rejected(report) = &request {
            self.report = report.clone();
        }
        request
    }

    /// Mark the in-flight attempt as finished, whatever its outcome.
    pub fn finish_submit(&mut self) {
        self.controller.finish();
    }

    /// Full submission lifecycle in one await: request, run the collaborator,
    /// return to idle.
    pub async fn submit(&mut self, handler: &dyn SubmitHandler) -> SubmitOutcome {
        if self.controller.is_busy() {
            return SubmitOutcome::Busy;
        }
        self.touched.mark_all();
        let outcome = self
            .controller
            .submit_with(self.store.snapshot(), &self.options, handler)
            .await;
        if let SubmitOutcome::Rejected(report) = &outcome {
            self.report = report.clone();
        }
        outcome
    }

    fn revalidate(&mut self) {
        self.report = validate_with(self.store.snapshot(), &self.options);
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(FormOptions::full())
    }
}

// ============================================================================
// Tests
// ============================================================================
