#![forbid(unsafe_code)]

//! Command-line argument parsing for the folio demo.
//!
//! Parses args by hand to keep the binary lean. Supports environment
//! variable overrides via the `FOLIO_DEMO_*` prefix; explicit flags win over
//! the environment, which wins over defaults.
//!
//! Help, version and errors are returned to the caller; `main` decides what
//! to print and the exit status.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::terminal::DemoError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
folio demo: scrambled hero line and command palette

USAGE:
    folio-demo [OPTIONS]

OPTIONS:
    --seed=N               Seed the scramble RNG (default: random)
    --fps=N                Animation frames per second (default: 60)
    --role-interval-ms=N   Milliseconds between hero roles (default: 3000)
    --reveal-delay-ms=N    Delay before each reveal starts (default: 100)
    --exit-after-ms=N      Quit after N milliseconds, 0 = never (default: 0)
    --log=PATH             Write tracing output to PATH
    --help, -h             Show this help message
    --version, -V          Show version

KEYBINDINGS:
    Ctrl+K          Open the command palette
    Up / Down       Move the palette selection
    Enter           Run the selected command
    Esc             Close the palette
    s               Re-scramble the hero line
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    FOLIO_DEMO_SEED               Override --seed
    FOLIO_DEMO_FPS                Override --fps
    FOLIO_DEMO_ROLE_INTERVAL_MS   Override --role-interval-ms
    FOLIO_DEMO_REVEAL_DELAY_MS    Override --reveal-delay-ms
    FOLIO_DEMO_EXIT_AFTER_MS      Override --exit-after-ms
    FOLIO_DEMO_LOG                Override --log
    FOLIO_LOG                     Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Animation frame rate.
    pub fps: u32,
    /// Milliseconds between hero role changes.
    pub role_interval_ms: u64,
    /// Delay before each hero reveal.
    pub reveal_delay_ms: u64,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Log file for tracing output.
    pub log_path: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            seed: None,
            fps: 60,
            role_interval_ms: 3000,
            reveal_delay_ms: 100,
            exit_after_ms: 0,
            log_path: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Run the demo with these options.
    Run(Opts),
    /// Print [`HELP_TEXT`] and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Rejected command-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag's value failed to parse or was out of range.
    InvalidValue { flag: &'static str, value: String },
    /// An argument nobody recognises.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Frame period derived from [`fps`](Self::fps).
    #[must_use]
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.fps.max(1)
    }
}

/// Parse the process arguments and environment.
pub fn from_process() -> Result<Parsed, DemoError> {
    load(env::args().skip(1), |key| env::var(key).ok())
}

/// [`parse_from`], with rejected input lifted into [`DemoError::Cli`].
pub fn load<I, S, F>(args: I, env: F) -> Result<Parsed, DemoError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_from(args, env)?)
}

/// Parse `args` with `env` as the environment lookup.
///
/// Unparseable environment values are ignored; unparseable flags are errors.
pub fn parse_from<I, S, F>(args: I, env: F) -> Result<Parsed, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(n) = env("FOLIO_DEMO_SEED").and_then(|v| v.parse::<u64>().ok()) {
        opts.seed = Some(n);
    }
    if let Some(n) = env("FOLIO_DEMO_FPS").and_then(|v| v.parse::<u32>().ok())
        && n > 0
    {
        opts.fps = n;
    }
    if let Some(n) = env("FOLIO_DEMO_ROLE_INTERVAL_MS").and_then(|v| v.parse::<u64>().ok())
        && n > 0
    {
        opts.role_interval_ms = n;
    }
    if let Some(n) = env("FOLIO_DEMO_REVEAL_DELAY_MS").and_then(|v| v.parse::<u64>().ok()) {
        opts.reveal_delay_ms = n;
    }
    if let Some(n) = env("FOLIO_DEMO_EXIT_AFTER_MS").and_then(|v| v.parse::<u64>().ok()) {
        opts.exit_after_ms = n;
    }
    if let Some(path) = env("FOLIO_DEMO_LOG").filter(|v| !v.is_empty()) {
        opts.log_path = Some(PathBuf::from(path));
    }

    // Parse command-line args (override env vars)
    for arg in args {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(Parsed::Help),
            "--version" | "-V" => return Ok(Parsed::Version),
            other => {
                if let Some(val) = other.strip_prefix("--seed=") {
                    opts.seed = Some(number("--seed", val)?);
                } else if let Some(val) = other.strip_prefix("--fps=") {
                    opts.fps = positive("--fps", val)?;
                } else if let Some(val) = other.strip_prefix("--role-interval-ms=") {
                    opts.role_interval_ms = positive("--role-interval-ms", val)?;
                } else if let Some(val) = other.strip_prefix("--reveal-delay-ms=") {
                    opts.reveal_delay_ms = number("--reveal-delay-ms", val)?;
                } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                    opts.exit_after_ms = number("--exit-after-ms", val)?;
                } else if let Some(val) = other.strip_prefix("--log=") {
                    if val.is_empty() {
                        return Err(invalid("--log", val));
                    }
                    opts.log_path = Some(PathBuf::from(val));
                } else {
                    return Err(CliError::UnknownArgument(other.to_owned()));
                }
            }
        }
    }

    Ok(Parsed::Run(opts))
}

fn invalid(flag: &'static str, value: &str) -> CliError {
    CliError::InvalidValue {
        flag,
        value: value.to_owned(),
    }
}

fn number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| invalid(flag, value))
}

fn positive<T>(flag: &'static str, value: &str) -> Result<T, CliError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let n: T = number(flag, value)?;
    if n > T::default() {
        Ok(n)
    } else {
        Err(invalid(flag, value))
    }
}
