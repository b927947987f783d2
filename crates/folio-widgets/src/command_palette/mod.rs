#![forbid(unsafe_code)]

//! Command palette: search, selection, and keyboard control over a static
//! command registry.
//!
//! # Usage
//!
//! ```ignore
//! let mut palette = PaletteController::new(CommandRegistry::portfolio());
//!
//! // In your update loop, route events through the palette first:
//! let mut router = |cmd: &Command| navigate(cmd.target());
//! if let Some(action) = palette.handle_event(&event, &mut router) {
//!     match action {
//!         PaletteAction::Execute(id) => { /* router already ran */ }
//!         PaletteAction::Dismiss => { /* palette was closed */ }
//!     }
//! }
//!
//! // Shells draw from the derived view:
//! for group in palette.grouped() { /* header + rows */ }
//! ```
//!
//! # Key map
//!
//! | State  | Key                | Effect                                   |
//! |--------|--------------------|------------------------------------------|
//! | Closed | Ctrl+K / Super+K   | open                                     |
//! | Open   | Up / Down          | previous / next, wrapping                |
//! | Open   | Home / End         | first / last                             |
//! | Open   | Enter              | invoke selected command, then close      |
//! | Open   | Escape             | close without invoking                   |
//! | Open   | printable char     | append to query                          |
//! | Open   | Backspace          | drop last query char                     |
//! | Open   | Ctrl+U             | clear query                              |
//!
//! # Submodules
//!
//! - [`registry`]: commands, categories, and the filtered/grouped views

pub mod registry;

pub use registry::{Category, Command, CommandGroup, CommandRegistry, CommandTarget, RegistryError};

use folio_core::event::{Event, KeyCode, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// Invocation seam
// ---------------------------------------------------------------------------

/// Performs a command's side effect. Owned by the host (router, browser
/// opener, test recorder); the palette never waits on it.
pub trait Invoker {
    /// Run `command`.
    fn invoke(&mut self, command: &Command);
}

impl<F: FnMut(&Command)> Invoker for F {
    fn invoke(&mut self, command: &Command) {
        self(command);
    }
}

// ---------------------------------------------------------------------------
// Palette Action
// ---------------------------------------------------------------------------

/// Outcome reported from event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// A command was invoked (contains its id). The palette is now closed.
    Execute(String),
    /// The palette was dismissed without invoking anything.
    Dismiss,
}

/// Selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the list, wrapping to the first entry.
    Next,
    /// Towards the start of the list, wrapping to the last entry.
    Previous,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Open/closed state, query and selection for a command palette.
///
/// # Invariants
///
/// 1. `selected < filtered().len()` whenever the filtered list is non-empty;
///    `selected == 0` otherwise.
/// 2. Every query change resets `selected` to 0.
/// 3. Opening, closing, and executing all leave `query` empty and
///    `selected == 0`.
/// 4. Only a command in the current filtered list is ever invoked.
#[derive(Debug, Clone)]
pub struct PaletteController {
    registry: CommandRegistry,
    open: bool,
    query: String,
    selected: usize,
}

impl PaletteController {
    /// Create a closed palette over `registry`.
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            open: false,
            query: String::new(),
            selected: 0,
        }
    }

    // --- Visibility ---

    /// Open the palette with an empty query and the first entry selected.
    pub fn open(&mut self) {
        self.open = true;
        self.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!(commands = self.registry.len(), "palette opened");
    }

    /// Close the palette without invoking anything.
    pub fn close(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(was_open = self.open, query = %self.query, "palette closed");
        self.open = false;
        self.reset();
    }

    /// Whether the palette is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    // --- Query ---

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query. Ignored while closed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.edit_query(|query| *query = text);
    }

    /// Apply a query mutation and re-anchor the selection.
    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        if !self.open {
            return;
        }
        edit(&mut self.query);
        self.selected = 0;
        #[cfg(feature = "tracing")]
        tracing::trace!(query = %self.query, results = self.result_count(), "palette query");
    }

    // --- Derived view ---

    /// The registry the palette searches.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Matching commands in category order; `selected_index` points here.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Command> {
        self.registry.filter(&self.query)
    }

    /// Matching commands split into non-empty category groups.
    #[must_use]
    pub fn grouped(&self) -> Vec<CommandGroup<'_>> {
        self.registry.grouped(&self.query)
    }

    /// Number of matching commands.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.filtered().len()
    }

    /// Currently selected index into [`filtered`](Self::filtered).
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected command, if the filtered list is non-empty.
    #[must_use]
    pub fn selected_command(&self) -> Option<&Command> {
        self.filtered().get(self.selected).copied()
    }

    // --- Selection ---

    /// Move the selection one step, wrapping at either end.
    ///
    /// No-op (index stays 0) when nothing matches or the palette is closed.
    pub fn move_selection(&mut self, direction: Direction) {
        let len = self.result_count();
        if !self.open || len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1);
        self.selected = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => current.checked_sub(1).unwrap_or(len - 1),
        };
    }

    /// Select the first matching command. Ignored while closed.
    pub fn select_first(&mut self) {
        if !self.open {
            return;
        }
        self.selected = 0;
    }

    /// Select the last matching command (0 when nothing matches). Ignored
    /// while closed.
    pub fn select_last(&mut self) {
        if !self.open {
            return;
        }
        self.selected = self.result_count().saturating_sub(1);
    }

    // --- Activation ---

    /// Invoke the selected command once, then close.
    ///
    /// Returns `None` without invoking anything when the palette is closed or
    /// nothing matches; the palette's state is left untouched in that case.
    pub fn activate<I: Invoker + ?Sized>(&mut self, invoker: &mut I) -> Option<PaletteAction> {
        if !self.open {
            return None;
        }
        let command = self.filtered().get(self.selected).copied().cloned()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(id = command.id(), dest = %command.target(), "palette execute");
        invoker.invoke(&command);
        self.close();
        Some(PaletteAction::Execute(command.id().to_owned()))
    }

    // --- Event Handling ---

    /// Whether `key` is the global open chord (Ctrl+K or Super+K).
    #[must_use]
    pub fn is_open_hotkey(key: &KeyEvent) -> bool {
        key.is_press()
            && matches!(key.code, KeyCode::Char('k' | 'K'))
            && key.modifiers.intersects(Modifiers::CTRL | Modifiers::SUPER)
    }

    /// Handle an input event.
    ///
    /// While closed only the open hotkey is recognised. While open, returns a
    /// [`PaletteAction`] when a command ran or the palette was dismissed;
    /// `None` when the event only changed query or selection.
    pub fn handle_event<I: Invoker + ?Sized>(
        &mut self,
        event: &Event,
        invoker: &mut I,
    ) -> Option<PaletteAction> {
        if !self.open {
            if let Event::Key(key) = event
                && Self::is_open_hotkey(key)
            {
                self.open();
            }
            return None;
        }

        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key, invoker),
            Event::Paste(text) => {
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                if !text.is_empty() {
                    self.edit_query(|query| query.push_str(&text));
                }
                None
            }
            _ => None,
        }
    }

    /// Handle a key press while the palette is open.
    fn handle_key<I: Invoker + ?Sized>(
        &mut self,
        key: &KeyEvent,
        invoker: &mut I,
    ) -> Option<PaletteAction> {
        match key.code {
            KeyCode::Escape => {
                self.close();
                return Some(PaletteAction::Dismiss);
            }
            KeyCode::Enter => return self.activate(invoker),
            KeyCode::Up => self.move_selection(Direction::Previous),
            KeyCode::Down => self.move_selection(Direction::Next),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Backspace => {
                if !self.query.is_empty() {
                    self.edit_query(|query| {
                        query.pop();
                    });
                }
            }
            KeyCode::Char(c) => {
                if key.ctrl() || key.super_key() {
                    // Ctrl+U: clear query
                    if key.ctrl() && c == 'u' && !self.query.is_empty() {
                        self.edit_query(String::clear);
                    }
                } else {
                    self.edit_query(|query| query.push(c));
                }
            }
            _ => {}
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
