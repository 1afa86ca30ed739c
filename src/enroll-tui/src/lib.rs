//! Terminal front end for the enrollment form.
//!
//! This crate renders the New Account form with ratatui and drives it
//! with crossterm events. All form semantics live in `enroll-form`; this
//! crate owns focus, text editing, layout, and the async plumbing that
//! keeps the screen live while a submission runs.
//!
//! ```text
//!   crossterm events ──▶ EventLoop ──▶ App ──▶ FormSession
//!                            │          │
//!                            │          └──▶ NewAccountView ──▶ terminal
//!                            │
//!                            └──▶ spawned collaborator task ──▶ SubmitOutcome
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use enroll_form::{FormOptions, FormSession};
//! use enroll_tui::SimulatedSubmit;
//!
//! let session = FormSession::new(FormOptions::full());
//! let handler = Arc::new(SimulatedSubmit::default());
//! let exit = enroll_tui::run(session, handler).await?;
//! if let Some(values) = exit.submitted {
//!     println!("submitted {}", values.full_name);
//! }
//! ```

pub mod app;
pub mod borders;
pub mod checkbox;
pub mod event_loop;
pub mod focus;
pub mod hints;
pub mod input;
pub mod select;
pub mod simulate;
pub mod spinner;
pub mod terminal;
pub mod theme;
pub mod view;

pub use app::{App, AppAction, StatusKind, StatusMessage};
pub use event_loop::{AppExitInfo, EventLoop, run};
pub use focus::{FocusCycle, FocusDirection, FocusStop};
pub use simulate::SimulatedSubmit;
pub use terminal::{EnrollTerminal, TerminalOptions, is_terminal, restore_terminal};
pub use view::NewAccountView;

/// Crate version, for the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
