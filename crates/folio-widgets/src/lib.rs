#![forbid(unsafe_code)]

//! Interactive components for folio.
//!
//! Components here own state and react to [`folio_core::event::Event`]s;
//! drawing them is left to the shell that hosts them.

pub mod command_palette;

pub use command_palette::{
    Category, Command, CommandGroup, CommandRegistry, CommandTarget, Direction, Invoker,
    PaletteAction, PaletteController, RegistryError,
};
