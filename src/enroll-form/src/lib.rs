//! # Enroll Form
//!
//! Headless engine for the New Account demo form. Everything a UI needs to
//! run the form lives here, with no terminal or rendering dependency: the
//! record, the validation rules, the touched flags that gate error display,
//! and the submission state machine around an injected async collaborator.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      FormSession                        │
//! │  ┌────────────┐ ┌────────────┐ ┌─────────────────────┐  │
//! │  │ FieldStore │ │ TouchedSet │ │ SubmissionController│  │
//! │  │ (values)   │ │ (display   │ │ (Idle/Validating/   │  │
//! │  │            │ │  gating)   │ │  Submitting)        │  │
//! │  └─────┬──────┘ └────────────┘ └──────────┬──────────┘  │
//! │        │                                  │             │
//! │  ┌─────▼──────────────────────────────────▼──────────┐  │
//! │  │          validate() -> ValidationReport           │  │
//! │  │      (pure, rebuilt in full on every pass)        │  │
//! │  └───────────────────────────────────────────────────┘  │
//! └───────────────────────────┬─────────────────────────────┘
//!                             │
//!                  ┌──────────▼──────────┐
//!                  │    SubmitHandler    │
//!                  │ (injected, async,   │
//!                  │  the only external  │
//!                  │  boundary)          │
//!                  └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use enroll_form::{FieldEdit, FormOptions, FormSession, SubmitOutcome};
//!
//! let mut session = FormSession::new(FormOptions::full());
//! session.set_field(FieldEdit::FullName("Jane Doe".into()));
//!
//! // Errors stay hidden until a field is touched or a submit is attempted.
//! let outcome = session.submit(&handler).await;
//! assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
//! ```

pub mod options;
pub mod session;
pub mod submit;
pub mod touched;
pub mod validate;
pub mod values;

pub use options::FormOptions;
pub use session::FormSession;
pub use submit::{
    FormError, SubmissionController, SubmissionState, SubmitContext, SubmitHandler, SubmitOutcome,
    SubmitRequest, SubmitTicket, run_collaborator,
};
pub use touched::TouchedSet;
pub use validate::{ValidationReport, validate, validate_with};
pub use values::{
    DEPENDENTS_UNSET, FieldEdit, FieldId, FieldStore, FormValues, RiskLevel,
};

/// Enroll form engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
