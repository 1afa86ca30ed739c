//! Terminal setup, teardown, and management.
//!
//! Wraps crossterm initialization behind an RAII guard so the terminal is
//! restored to a sane state on every exit path, panics included.

use std::io::{self, IsTerminal, Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// The panic hook must only be installed once.
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Guard
// ============================================================================

/// RAII guard that restores the terminal on drop.
///
/// Tracks which features were enabled during initialization and only
/// disables those during cleanup.
pub struct TerminalGuard {
    alternate_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal_impl(
            self.alternate_screen,
            self.mouse_capture,
            self.bracketed_paste,
        );
    }
}

// ============================================================================
// Options
// ============================================================================

/// Configuration for terminal initialization.
///
/// The form is keyboard driven, so mouse capture stays off by default and
/// the terminal keeps native text selection.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Capture mouse events.
    pub mouse_capture: bool,
    /// Wrap pasted text in escape sequences so it arrives as one event.
    pub bracketed_paste: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: false,
            bracketed_paste: true,
        }
    }
}

impl TerminalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    pub fn mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    pub fn bracketed_paste(mut self, enabled: bool) -> Self {
        self.bracketed_paste = enabled;
        self
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Wrapper around the ratatui terminal with form-screen setup.
///
/// The terminal is restored to its original state when this is dropped.
pub struct EnrollTerminal {
    /// The underlying ratatui terminal.
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl EnrollTerminal {
    /// Create a terminal in full-screen mode with bracketed paste.
    pub fn new() -> Result<Self> {
        Self::with_options(TerminalOptions::default())
    }

    pub fn with_options(options: TerminalOptions) -> Result<Self> {
        init_terminal(&options)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let guard = TerminalGuard {
            alternate_screen: options.alternate_screen,
            mouse_capture: options.mouse_capture,
            bracketed_paste: options.bracketed_paste,
        };

        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    /// Draw one frame.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

// ============================================================================
// Setup / restore
// ============================================================================

fn init_terminal(options: &TerminalOptions) -> Result<()> {
    install_panic_hook();

    enable_raw_mode()?;

    let mut stdout = stdout();
    if options.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    if options.mouse_capture {
        execute!(stdout, EnableMouseCapture)?;
    }
    if options.bracketed_paste {
        execute!(stdout, EnableBracketedPaste)?;
    }
    execute!(stdout, Clear(ClearType::All), cursor::Hide)?;

    Ok(())
}

fn restore_terminal_impl(
    alternate_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
) -> Result<()> {
    let mut stdout = io::stdout();

    execute!(stdout, cursor::Show)?;
    if bracketed_paste {
        execute!(stdout, DisableBracketedPaste)?;
    }
    if mouse_capture {
        execute!(stdout, DisableMouseCapture)?;
    }
    if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)?;
    }
    disable_raw_mode()?;

    Ok(())
}

/// Restore the terminal assuming every feature was enabled.
///
/// Disabling a feature that was never on is harmless, so this is safe to
/// call from panic and error paths that cannot see the real options.
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl(true, true, true)
}

/// Install a panic hook that restores the terminal before the panic
/// message prints. Installed at most once.
fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Whether stdout is connected to a terminal.
pub fn is_terminal() -> bool {
    stdout().is_terminal()
}

// ============================================================================
// Tests
// ============================================================================
