#![forbid(unsafe_code)]

//! Terminal demo for the folio hero scramble and command palette.
//!
//! The binary in `main.rs` is a thin loop; everything testable lives here:
//!
//! - [`cli`]: flags and `FOLIO_DEMO_*` overrides
//! - [`app`]: the model and its messages
//! - [`view`]: pure text rendering of the model
//! - [`terminal`]: crossterm session guard and [`terminal::DemoError`]
//! - [`logging`]: tracing subscriber setup

pub mod app;
pub mod cli;
pub mod logging;
pub mod terminal;
pub mod view;
