#![forbid(unsafe_code)]

//! Terminal session guard and the demo's top-level error.
//!
//! # Lifecycle Guarantees
//!
//! 1. Raw mode, the alternate screen, bracketed paste and the hidden cursor
//!    are each tracked by a flag and undone in reverse order on drop.
//! 2. A panic hook restores the terminal before the panic message prints,
//!    since the release profile aborts instead of unwinding.

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::{cursor, event, execute, queue, style, terminal};
use folio_core::event::Event;

use crate::cli::CliError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that stops the demo from running.
#[derive(Debug)]
pub enum DemoError {
    /// Bad command-line input.
    Cli(CliError),
    /// Terminal I/O failed.
    Io(io::Error),
    /// The log file could not be opened or the subscriber installed.
    Logging(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "terminal error: {err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cli(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CliError> for DemoError {
    fn from(err: CliError) -> Self {
        Self::Cli(err)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// RAII owner of the terminal modes the demo needs.
#[derive(Debug)]
pub struct TerminalSession {
    raw_mode: bool,
    alternate_screen: bool,
    bracketed_paste: bool,
    cursor_hidden: bool,
}

impl TerminalSession {
    /// Enter raw mode, the alternate screen and bracketed paste; hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error; whatever was already enabled is undone.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        let mut session = Self {
            raw_mode: false,
            alternate_screen: false,
            bracketed_paste: false,
            cursor_hidden: false,
        };
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        session.raw_mode = true;
        tracing::info!("terminal raw mode enabled");

        execute!(stdout, terminal::EnterAlternateScreen)?;
        session.alternate_screen = true;

        execute!(stdout, event::EnableBracketedPaste)?;
        session.bracketed_paste = true;

        execute!(stdout, cursor::Hide)?;
        session.cursor_hidden = true;

        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read one event, dropping those the demo has no use for.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(event::read()?))
    }

    /// Draw `lines` from the top-left corner, clearing each row.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(
                stdout,
                cursor::MoveTo(0, row),
                terminal::Clear(terminal::ClearType::CurrentLine),
                style::Print(line)
            )?;
        }
        stdout.flush()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        // Disable in reverse order of enabling
        if self.cursor_hidden {
            let _ = execute!(stdout, cursor::Show);
            self.cursor_hidden = false;
        }
        if self.bracketed_paste {
            let _ = execute!(stdout, event::DisableBracketedPaste);
            self.bracketed_paste = false;
        }
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
            tracing::info!("terminal raw mode disabled");
        }
        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Show);
    let _ = execute!(stdout, event::DisableBracketedPaste);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn demo_error_display() {
        let io_err = DemoError::from(io::Error::other("tty gone"));
        assert_eq!(io_err.to_string(), "terminal error: tty gone");
        assert!(io_err.source().is_some());

        let cli = DemoError::from(CliError::UnknownArgument("--x".into()));
        assert_eq!(cli.to_string(), "unknown argument: --x");

        let log = DemoError::Logging("permission denied".into());
        assert_eq!(log.to_string(), "logging setup failed: permission denied");
        assert!(log.source().is_none());
    }
}
