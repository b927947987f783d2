#![forbid(unsafe_code)]

//! Integration tests for the palette driven purely through events.
//!
//! These walk the flows a visitor actually performs: open with the hotkey,
//! type, arrow around, then execute or dismiss.

use folio_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use folio_widgets::{Command, CommandRegistry, CommandTarget, PaletteAction, PaletteController};
use tracing::{Level, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn press(code: KeyCode) -> Event {
    Event::key(code)
}

fn ctrl_k() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('k')).with_modifiers(Modifiers::CTRL))
}

/// Feed events, collecting the targets the palette asked us to perform.
fn run(palette: &mut PaletteController, events: &[Event]) -> (Vec<CommandTarget>, Vec<PaletteAction>) {
    let mut targets = Vec::new();
    let mut actions = Vec::new();
    for event in events {
        let mut invoker = |cmd: &Command| targets.push(cmd.target().clone());
        if let Some(action) = palette.handle_event(event, &mut invoker) {
            info!(?action, "palette action");
            actions.push(action);
        }
    }
    (targets, actions)
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(|c| press(KeyCode::Char(c))).collect()
}

#[test]
fn hotkey_type_enter_navigates() {
    init_tracing();
    let mut palette = PaletteController::new(CommandRegistry::portfolio());

    let mut events = vec![ctrl_k()];
    events.extend(typed("blog"));
    events.push(press(KeyCode::Enter));
    let (targets, actions) = run(&mut palette, &events);

    assert_eq!(targets, [CommandTarget::Navigate("/blog".into())]);
    assert_eq!(actions, [PaletteAction::Execute("blog".into())]);
    assert!(!palette.is_open());
}

#[test]
fn arrow_to_social_opens_link() {
    init_tracing();
    let mut palette = PaletteController::new(CommandRegistry::portfolio());

    let mut events = vec![ctrl_k()];
    events.extend(typed("profile"));
    events.extend([press(KeyCode::Down), press(KeyCode::Enter)]);
    let (targets, _) = run(&mut palette, &events);

    assert_eq!(
        targets,
        [CommandTarget::Open("https://linkedin.com/in/chetanoli".into())]
    );
}

#[test]
fn escape_then_reopen_starts_fresh() {
    init_tracing();
    let mut palette = PaletteController::new(CommandRegistry::portfolio());

    let mut events = vec![ctrl_k()];
    events.extend(typed("about"));
    events.extend([press(KeyCode::Escape), ctrl_k()]);
    let (targets, actions) = run(&mut palette, &events);

    assert!(targets.is_empty());
    assert_eq!(actions, [PaletteAction::Dismiss]);
    assert!(palette.is_open());
    assert_eq!(palette.query(), "");
    assert_eq!(palette.result_count(), palette.registry().len());
}

#[test]
fn enter_on_no_results_keeps_palette_open() {
    init_tracing();
    let mut palette = PaletteController::new(CommandRegistry::portfolio());

    let mut events = vec![ctrl_k()];
    events.extend(typed("zzz"));
    events.push(press(KeyCode::Enter));
    let (targets, actions) = run(&mut palette, &events);

    assert!(targets.is_empty());
    assert!(actions.is_empty());
    assert!(palette.is_open());
    assert!(palette.grouped().is_empty());
}
