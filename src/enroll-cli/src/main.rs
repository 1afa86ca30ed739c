//! Enrollment demo - main entry point.
//!
//! Runs the New Account form in the terminal against a simulated backend.
//! The simulated delay, failure mode, submission timeout, and form variant
//! are all selectable from the command line, and `--debug` mirrors every
//! trace-level log into `./debug.txt` for watching the engine work.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use enroll_form::{FormOptions, FormSession, SubmitHandler};
use enroll_tui::SimulatedSubmit;

/// Command line flags for the enrollment demo.
#[derive(Parser, Debug)]
#[command(name = "enroll")]
#[command(author, version, about = "New Account enrollment form demo", long_about = None)]
struct Cli {
    /// Run the basic variant: no helper text, no conditional comment rule.
    #[arg(long, default_value_t = false)]
    basic: bool,

    /// Hide the helper text under each field.
    #[arg(long = "no-helper-text", default_value_t = false)]
    no_helper_text: bool,

    /// Simulated backend delay in milliseconds.
    #[arg(long = "delay-ms", default_value_t = 5000, value_name = "MS")]
    delay_ms: u64,

    /// Complete submissions immediately.
    #[arg(long, default_value_t = false, conflicts_with = "delay_ms")]
    instant: bool,

    /// Make the simulated backend reject every submission.
    #[arg(long = "fail-submit", default_value_t = false)]
    fail_submit: bool,

    /// Give up on submissions that take longer than this many milliseconds.
    #[arg(long = "timeout-ms", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Write trace-level logs to ./debug.txt.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

impl Cli {
    fn form_options(&self) -> FormOptions {
        if self.basic {
            FormOptions::basic()
        } else if self.no_helper_text {
            FormOptions::full().with_helper_text(false)
        } else {
            FormOptions::full()
        }
    }

    fn backend_delay(&self) -> Duration {
        if self.instant {
            Duration::ZERO
        } else {
            Duration::from_millis(self.delay_ms)
        }
    }
}

/// Guard that flushes the debug log file when dropped.
struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up debug file logging that writes all trace-level logs to ./debug.txt.
fn setup_debug_file_logging() -> Result<DebugLogGuard> {
    use std::fs::File;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let debug_file_path = std::env::current_dir()?.join("debug.txt");
    let file = File::create(&debug_file_path).map_err(|e| {
        anyhow::anyhow!("failed to create debug.txt: {e}. Check write permissions.")
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("trace"))
        .with(file_layer)
        .init();

    eprintln!("Debug mode enabled: logging to {}", debug_file_path.display());

    Ok(DebugLogGuard { _guard: guard })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _debug_guard = if cli.debug {
        Some(setup_debug_file_logging()?)
    } else {
        None
    };

    if !enroll_tui::is_terminal() {
        bail!("enroll needs an interactive terminal; stdout is not a tty");
    }

    let handler: Arc<dyn SubmitHandler> =
        Arc::new(SimulatedSubmit::new(cli.backend_delay()).failing(cli.fail_submit));

    let mut session = FormSession::new(cli.form_options());
    if let Some(timeout_ms) = cli.timeout_ms {
        session = session.with_timeout(Duration::from_millis(timeout_ms));
    }

    tracing::info!(version = enroll_tui::VERSION, "starting enrollment form");
    let exit = enroll_tui::run(session, handler).await?;

    match exit.submitted {
        Some(values) => {
            println!("Submitted after {} attempt(s):", exit.attempts);
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        None => println!("No submission made."),
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
