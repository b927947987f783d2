#![forbid(unsafe_code)]

//! Demo application model.
//!
//! All state lives in [`AppModel`]; messages drive transitions and the view
//! is a pure function of state (see [`crate::view`]). The terminal loop in
//! `main.rs` only translates crossterm input into [`AppMsg`] and draws.

use std::time::Duration;

use folio_core::animation::{Animation, ScrambleAnimator, ScrambleEvent};
use folio_core::event::{Event, KeyCode, Modifiers};
use folio_widgets::{Command, CommandRegistry, CommandTarget, PaletteAction, PaletteController};

use crate::cli::Opts;

/// Roles cycled through by the hero line.
pub const ROLES: [&str; 4] = [
    "Senior Software Engineer",
    "Frontend Architect",
    "React Specialist",
    "UI/UX Developer",
];

/// Default time each role stays on screen.
pub const DEFAULT_ROLE_INTERVAL: Duration = Duration::from_millis(3000);

/// Default delay before each hero reveal begins.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// AppMsg / Cmd
// ---------------------------------------------------------------------------

/// Top-level application message.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// A terminal input event.
    Event(Event),
    /// One animation frame elapsed, `dt` after the previous one.
    Tick(Duration),
    /// Quit the application.
    Quit,
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// What the loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Keep running.
    None,
    /// Leave the loop and restore the terminal.
    Quit,
}

// ---------------------------------------------------------------------------
// AppModel
// ---------------------------------------------------------------------------

/// Top-level application state.
pub struct AppModel {
    hero: ScrambleAnimator,
    role_index: usize,
    role_interval: Duration,
    reveal_delay: Duration,
    since_rotation: Duration,
    palette: PaletteController,
    /// Targets the palette has asked us to perform, oldest first.
    history: Vec<CommandTarget>,
    completed_reveals: u64,
    elapsed: Duration,
    exit_after: Option<Duration>,
    size: (u16, u16),
    tick_count: u64,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    /// Model with an OS-seeded hero and default timings.
    pub fn new() -> Self {
        Self::with_hero(ScrambleAnimator::new())
    }

    /// Model with a deterministic hero, for tests and `--seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_hero(ScrambleAnimator::with_seed(seed))
    }

    /// Model configured from command-line options.
    pub fn from_opts(opts: &Opts) -> Self {
        let model = match opts.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        model
            .with_role_interval(Duration::from_millis(opts.role_interval_ms))
            .with_reveal_delay(Duration::from_millis(opts.reveal_delay_ms))
            .with_exit_after((opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)))
    }

    fn with_hero(mut hero: ScrambleAnimator) -> Self {
        hero.start(ROLES[0], DEFAULT_REVEAL_DELAY);
        Self {
            hero,
            role_index: 0,
            role_interval: DEFAULT_ROLE_INTERVAL,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            since_rotation: Duration::ZERO,
            palette: PaletteController::new(CommandRegistry::portfolio()),
            history: Vec::new(),
            completed_reveals: 0,
            elapsed: Duration::ZERO,
            exit_after: None,
            size: (80, 24),
            tick_count: 0,
        }
    }

    /// Time each role stays on screen. Zero is treated as one millisecond.
    #[must_use]
    pub fn with_role_interval(mut self, interval: Duration) -> Self {
        self.role_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Delay before each hero reveal; also restarts the initial reveal.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self.hero.start(ROLES[self.role_index], delay);
        self
    }

    /// Request quit once this much time has been ticked.
    #[must_use]
    pub fn with_exit_after(mut self, after: Option<Duration>) -> Self {
        self.exit_after = after;
        self
    }

    // --- Reads for the view ---

    /// The hero line as currently displayed.
    pub fn hero_text(&self) -> &str {
        self.hero.displayed_text()
    }

    /// The role the hero is showing or revealing.
    pub fn current_role(&self) -> &'static str {
        ROLES[self.role_index]
    }

    /// Whether a hero reveal is scheduled or running.
    pub fn hero_busy(&self) -> bool {
        self.hero.is_animating() || self.hero.is_pending()
    }

    /// Number of hero reveals that ran to completion.
    pub fn completed_reveals(&self) -> u64 {
        self.completed_reveals
    }

    /// The command palette state.
    pub fn palette(&self) -> &PaletteController {
        &self.palette
    }

    /// Everything the palette has performed, oldest first.
    pub fn history(&self) -> &[CommandTarget] {
        &self.history
    }

    /// Status line text for the last performed command.
    pub fn status(&self) -> Option<String> {
        self.history.last().map(ToString::to_string)
    }

    /// Last known terminal size (columns, rows).
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Number of ticks processed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // --- Update ---

    /// Apply a message.
    pub fn update(&mut self, msg: AppMsg) -> Cmd {
        match msg {
            AppMsg::Quit => Cmd::Quit,
            AppMsg::Tick(dt) => self.tick(dt),
            AppMsg::Event(event) => self.handle_event(event),
        }
    }

    fn tick(&mut self, dt: Duration) -> Cmd {
        self.tick_count += 1;
        self.elapsed += dt;
        if let Some(limit) = self.exit_after
            && self.elapsed >= limit
        {
            tracing::info!(elapsed_ms = self.elapsed.as_millis() as u64, "exit-after reached");
            return Cmd::Quit;
        }

        self.since_rotation += dt;
        if self.since_rotation >= self.role_interval {
            self.since_rotation = Duration::ZERO;
            self.role_index = (self.role_index + 1) % ROLES.len();
            let id = self.hero.start(ROLES[self.role_index], self.reveal_delay);
            tracing::debug!(run = %id, role = ROLES[self.role_index], "hero rotated");
        }

        self.hero.tick(dt);
        for event in self.hero.drain_events() {
            match event {
                ScrambleEvent::Completed(id) => {
                    self.completed_reveals += 1;
                    tracing::debug!(run = %id, "hero reveal completed");
                }
                ScrambleEvent::Started(id) => tracing::trace!(run = %id, "hero reveal started"),
                ScrambleEvent::Cancelled(id) => tracing::trace!(run = %id, "hero reveal cancelled"),
            }
        }
        Cmd::None
    }

    fn handle_event(&mut self, event: Event) -> Cmd {
        if let Event::Resize { width, height } = event {
            self.size = (width, height);
            return Cmd::None;
        }

        // When the command palette is open, route events to it first.
        if self.palette.is_open() {
            let mut performed = Vec::new();
            let action = self
                .palette
                .handle_event(&event, &mut |cmd: &Command| performed.push(cmd.target().clone()));
            match action {
                Some(PaletteAction::Execute(id)) => tracing::info!(%id, "command executed"),
                Some(PaletteAction::Dismiss) => tracing::debug!("palette dismissed"),
                None => {}
            }
            self.history.extend(performed);
            return Cmd::None;
        }

        let Event::Key(key) = &event else {
            return Cmd::None;
        };
        if !key.is_press() {
            return Cmd::None;
        }
        if PaletteController::is_open_hotkey(key) {
            self.palette.open();
            return Cmd::None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), Modifiers::NONE) => Cmd::Quit,
            (KeyCode::Char('c'), Modifiers::CTRL) => Cmd::Quit,
            (KeyCode::Char('s'), Modifiers::NONE) => {
                self.since_rotation = Duration::ZERO;
                self.hero.start(ROLES[self.role_index], Duration::ZERO);
                Cmd::None
            }
            _ => Cmd::None,
        }
    }
}
