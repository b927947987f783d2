#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Animations here are advanced by the host once per animation frame.
//! Each tick carries the wall-clock time since the previous frame so
//! that one-shot timers (reveal delays) can run on the same schedule as
//! the frames themselves. There is no internal clock and no thread: the
//! host owns the loop.
//!
//! # Submodules
//!
//! - [`scramble`]: randomized per-glyph text reveal

pub mod scramble;

use std::time::Duration;

pub use scramble::{
    AnimationRun, Glyph, RunId, ScrambleAnimator, ScrambleConfig, ScrambleConfigError,
    ScrambleEvent, scramble_at_progress,
};

/// A frame-driven animation producing a progress value in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by one frame, `dt` after the previous one.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has nothing left to do.
    fn is_complete(&self) -> bool;

    /// Current progress, clamped to [0.0, 1.0].
    fn value(&self) -> f32;
}
