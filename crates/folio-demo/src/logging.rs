#![forbid(unsafe_code)]

//! Tracing subscriber setup for the demo.
//!
//! The terminal belongs to the UI, so logs only go somewhere when a log file
//! is configured. Filter directives come from `FOLIO_LOG` (default `info`).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::terminal::DemoError;

/// Environment variable holding filter directives.
pub const FILTER_ENV: &str = "FOLIO_LOG";

/// Build the filter from `FOLIO_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a file-backed subscriber when `path` is set; no-op otherwise.
///
/// # Errors
///
/// Fails when the file cannot be created or a global subscriber already exists.
pub fn init(path: Option<&Path>) -> Result<(), DemoError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|err| DemoError::Logging(format!("{}: {err}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| DemoError::Logging(err.to_string()))?;
    tracing::info!(log = %path.display(), version = crate::cli::VERSION, "folio-demo logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn unwritable_path_reports_logging_error() {
        let err = init(Some(Path::new("/nonexistent-dir/folio/demo.log")));
        assert!(matches!(err, Err(DemoError::Logging(msg)) if msg.contains("demo.log")));
    }
}
