#![forbid(unsafe_code)]

//! Core: canonical input events and the scramble-text animator.

pub mod animation;
pub mod event;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
