#![forbid(unsafe_code)]

//! End-to-end tests for the command palette inside the demo model.
//!
//! These drive `AppModel` with synthetic key events and frame ticks, the
//! same messages the terminal loop produces, and check both the model and
//! the rendered text.
//!
//! Run: `cargo test -p folio-demo --test command_palette_e2e`

use std::time::Duration;

use folio_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use folio_demo::app::{AppModel, AppMsg, Cmd, ROLES};
use folio_demo::view;
use folio_widgets::CommandTarget;
use tracing::{Level, info};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const FRAME: Duration = Duration::from_millis(16);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Press,
    })
}

fn ctrl_press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
        kind: KeyEventKind::Press,
    })
}

fn type_chars(app: &mut AppModel, text: &str) {
    for ch in text.chars() {
        app.update(AppMsg::from(press(KeyCode::Char(ch))));
    }
}

/// Open the command palette via Ctrl+K.
fn open_palette(app: &mut AppModel) {
    app.update(AppMsg::from(ctrl_press(KeyCode::Char('k'))));
}

fn ticks(app: &mut AppModel, n: usize) {
    for _ in 0..n {
        app.update(AppMsg::Tick(FRAME));
    }
}

fn screen(app: &AppModel) -> String {
    view::render(app, 80, 30).join("\n")
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn open_type_select_execute() {
    init_tracing();
    let mut app = AppModel::with_seed(11);

    open_palette(&mut app);
    assert!(app.palette().is_open());
    assert!(screen(&app).contains("Search: _"));

    type_chars(&mut app, "profile");
    assert_eq!(app.palette().result_count(), 3);
    let text = screen(&app);
    assert!(text.contains("> GitHub Profile"));
    assert!(!text.contains("NAVIGATION"));

    app.update(AppMsg::from(press(KeyCode::Down)));
    app.update(AppMsg::from(press(KeyCode::Down)));
    assert!(screen(&app).contains("> Twitter Profile"));

    app.update(AppMsg::from(press(KeyCode::Enter)));
    info!(status = ?app.status(), "executed");
    assert!(!app.palette().is_open());
    assert_eq!(
        app.history(),
        [CommandTarget::Open("https://twitter.com/chetanoli".into())]
    );
    assert!(screen(&app).contains("open https://twitter.com/chetanoli"));
}

#[test]
fn no_results_then_recover() {
    init_tracing();
    let mut app = AppModel::with_seed(12);
    open_palette(&mut app);
    type_chars(&mut app, "xyz");
    assert!(screen(&app).contains("No commands found"));

    app.update(AppMsg::from(press(KeyCode::Enter)));
    assert!(app.palette().is_open());
    assert!(app.history().is_empty());

    app.update(AppMsg::from(ctrl_press(KeyCode::Char('u'))));
    type_chars(&mut app, "resume");
    app.update(AppMsg::from(press(KeyCode::Enter)));
    assert_eq!(app.status().as_deref(), Some("open /resume.pdf"));
}

#[test]
fn navigation_wraps_and_jumps() {
    init_tracing();
    let mut app = AppModel::with_seed(13);
    open_palette(&mut app);

    app.update(AppMsg::from(press(KeyCode::Up)));
    assert_eq!(app.palette().selected_index(), 9);
    assert!(screen(&app).contains("> Send Email"));

    app.update(AppMsg::from(press(KeyCode::Down)));
    assert_eq!(app.palette().selected_index(), 0);

    app.update(AppMsg::from(press(KeyCode::End)));
    app.update(AppMsg::from(press(KeyCode::Home)));
    assert!(screen(&app).contains("> Go to Home"));
}

#[test]
fn escape_closes_and_shell_keys_resume() {
    init_tracing();
    let mut app = AppModel::with_seed(14);
    open_palette(&mut app);
    type_chars(&mut app, "s");
    app.update(AppMsg::from(press(KeyCode::Escape)));
    assert!(!app.palette().is_open());
    assert!(!screen(&app).contains("Search:"));

    assert_eq!(app.update(AppMsg::from(press(KeyCode::Char('q')))), Cmd::Quit);
}

#[test]
fn hero_keeps_animating_behind_palette() {
    init_tracing();
    let mut app = AppModel::with_seed(15);
    open_palette(&mut app);
    ticks(&mut app, 120);
    assert_eq!(app.hero_text(), ROLES[0]);
    assert!(app.palette().is_open());
    assert!(screen(&app).contains(ROLES[0]));
}

#[test]
fn stress_many_actions_stay_consistent() {
    init_tracing();
    let mut app = AppModel::with_seed(16);
    let script = [
        ctrl_press(KeyCode::Char('k')),
        press(KeyCode::Char('o')),
        press(KeyCode::Down),
        press(KeyCode::Up),
        press(KeyCode::Backspace),
        press(KeyCode::Down),
        press(KeyCode::Enter),
    ];
    let mut executed = 0;
    for round in 0..200 {
        for event in &script {
            app.update(AppMsg::from(event.clone()));
        }
        ticks(&mut app, 1);
        executed += 1;
        assert_eq!(app.history().len(), executed, "round {round}");
        assert!(!app.palette().is_open());
    }
    assert!(
        app.history()
            .iter()
            .all(|t| *t == CommandTarget::Navigate("/work".into()))
    );
}
