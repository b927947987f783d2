#![forbid(unsafe_code)]

//! folio demo binary entry point.

use std::time::Instant;

use folio_demo::app::{AppModel, AppMsg, Cmd};
use folio_demo::terminal::{DemoError, TerminalSession};
use folio_demo::{cli, logging, view};

fn main() {
    if let Err(err) = start() {
        eprintln!("folio-demo: {err}");
        if matches!(err, DemoError::Cli(_)) {
            eprintln!("Run with --help for usage information.");
        }
        std::process::exit(1);
    }
}

fn start() -> Result<(), DemoError> {
    match cli::from_process()? {
        cli::Parsed::Run(opts) => run(&opts),
        cli::Parsed::Help => {
            println!("{}", cli::HELP_TEXT);
            Ok(())
        }
        cli::Parsed::Version => {
            println!("folio-demo {}", cli::VERSION);
            Ok(())
        }
    }
}

fn run(opts: &cli::Opts) -> Result<(), DemoError> {
    logging::init(opts.log_path.as_deref())?;

    let mut model = AppModel::from_opts(opts);
    let mut session = TerminalSession::enter()?;
    let (width, height) = session.size()?;
    model.update(AppMsg::Event(folio_core::event::Event::Resize { width, height }));

    let frame = opts.frame_interval();
    let mut last_tick = Instant::now();
    tracing::info!(fps = opts.fps, seed = ?opts.seed, "demo loop started");

    loop {
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if session.poll_event(timeout)? {
            if let Some(event) = session.read_event()?
                && model.update(AppMsg::from(event)) == Cmd::Quit
            {
                break;
            }
        }
        if last_tick.elapsed() < frame {
            continue;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick);
        last_tick = now;
        if model.update(AppMsg::Tick(dt)) == Cmd::Quit {
            break;
        }
        let (width, height) = model.size();
        session.draw(&view::render(&model, width, height))?;
    }

    tracing::info!(ticks = model.tick_count(), commands = model.history().len(), "demo loop finished");
    Ok(())
}
