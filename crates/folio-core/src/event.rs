#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Shells translate whatever their host delivers (crossterm on native
//! targets) into these types before handing them to the palette or the
//! demo model. All events derive `Clone`, `PartialEq`, and `Eq` for use
//! in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the terminal cannot tell.
//! - `Modifiers` use bitflags; Cmd, Meta and Hyper all fold into `SUPER`.
//! - Mouse input and keys with no binding (arrows left/right, Tab,
//!   paging, function keys) are not mapped: nothing in folio reacts to them.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Text delivered atomically by bracketed paste.
    Paste(String),
}

impl Event {
    /// Convert a Crossterm event into a folio [`Event`].
    ///
    /// Returns `None` for events folio does not model (mouse, focus,
    /// unmapped keys).
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }

    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Whether this is a press or an auto-repeat (not a release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        cte::Event::Paste(text) => Some(Event::Paste(text)),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let modifiers = map_modifiers(event.modifiers);
    let kind = map_key_kind(event.kind);
    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    #[test]
    fn key_event_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('k')).with_modifiers(Modifiers::CTRL);
        assert!(event.ctrl());
        assert!(!event.super_key());
    }

    #[test]
    fn release_is_not_press() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert!(press.is_press());
        assert!(press.with_kind(KeyEventKind::Repeat).is_press());
        assert!(!press.with_kind(KeyEventKind::Release).is_press());
    }

    #[test]
    fn map_key_event_char_with_ctrl() {
        let ct_event = ct_event::KeyEvent {
            code: ct_event::KeyCode::Char('k'),
            modifiers: ct_event::KeyModifiers::CONTROL,
            kind: ct_event::KeyEventKind::Press,
            state: ct_event::KeyEventState::NONE,
        };
        let mapped = map_key_event(ct_event).expect("should map");
        assert_eq!(mapped.code, KeyCode::Char('k'));
        assert!(mapped.ctrl());
        assert_eq!(mapped.kind, KeyEventKind::Press);
    }

    #[test]
    fn map_escape_and_arrows() {
        assert_eq!(map_key_code(ct_event::KeyCode::Esc), Some(KeyCode::Escape));
        assert_eq!(map_key_code(ct_event::KeyCode::Up), Some(KeyCode::Up));
        assert_eq!(map_key_code(ct_event::KeyCode::Down), Some(KeyCode::Down));
        assert_eq!(map_key_code(ct_event::KeyCode::CapsLock), None);
    }

    #[test]
    fn keys_without_a_binding_are_dropped() {
        for code in [
            ct_event::KeyCode::Left,
            ct_event::KeyCode::Right,
            ct_event::KeyCode::Tab,
            ct_event::KeyCode::BackTab,
            ct_event::KeyCode::Delete,
            ct_event::KeyCode::PageUp,
            ct_event::KeyCode::PageDown,
            ct_event::KeyCode::F(1),
        ] {
            assert_eq!(map_key_code(code), None, "{code:?}");
        }
        assert_eq!(map_key_code(ct_event::KeyCode::Home), Some(KeyCode::Home));
        assert_eq!(map_key_code(ct_event::KeyCode::End), Some(KeyCode::End));
        assert_eq!(
            map_key_code(ct_event::KeyCode::Backspace),
            Some(KeyCode::Backspace)
        );
    }

    #[test]
    fn meta_and_hyper_fold_into_super() {
        assert_eq!(
            map_modifiers(ct_event::KeyModifiers::META),
            Modifiers::SUPER
        );
        assert_eq!(
            map_modifiers(ct_event::KeyModifiers::HYPER),
            Modifiers::SUPER
        );
        assert_eq!(
            map_modifiers(ct_event::KeyModifiers::SHIFT | ct_event::KeyModifiers::ALT),
            Modifiers::SHIFT | Modifiers::ALT
        );
    }

    #[test]
    fn map_crossterm_resize_and_paste() {
        assert_eq!(
            map_crossterm_event_internal(ct_event::Event::Resize(80, 24)),
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            map_crossterm_event_internal(ct_event::Event::Paste("git".into())),
            Some(Event::Paste("git".into()))
        );
        assert_eq!(
            map_crossterm_event_internal(ct_event::Event::FocusGained),
            None
        );
    }
}
