#![forbid(unsafe_code)]

//! Scramble-text reveal: randomized per-glyph transition between strings.
//!
//! [`ScrambleAnimator`] moves its displayed text from whatever it shows now
//! to a new target. Every grapheme slot gets its own reveal window, so the
//! text resolves in a staggered, non-uniform order instead of a
//! left-to-right typewriter sweep.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use folio_core::animation::{Animation, ScrambleAnimator, ScrambleEvent};
//!
//! let mut hero = ScrambleAnimator::new();
//! hero.start("Frontend Architect", Duration::from_millis(100));
//!
//! // Once per animation frame:
//! hero.tick(Duration::from_millis(16));
//! draw(hero.displayed_text());
//! for event in hero.drain_events() {
//!     if let ScrambleEvent::Completed(_) = event { /* ... */ }
//! }
//! ```
//!
//! # Algorithm
//!
//! For each index `i` of `max(len(source), len(target))` graphemes a glyph
//! draws `reveal_start` uniformly from `[0, max_start_frame)` and
//! `reveal_end = reveal_start + uniform[0, max_duration_frames)`. On frame
//! `f` the glyph shows:
//!
//! - the target grapheme when `f >= reveal_end` (final from then on);
//! - a cached random symbol when `reveal_start <= f < reveal_end`, re-rolled
//!   with probability `reroll_probability` per frame;
//! - the source grapheme when `f < reveal_start`.
//!
//! # Invariants
//!
//! 1. `start` cancels the previous delay and run before any other mutation;
//!    a superseded run never writes the displayed text again.
//! 2. When a run completes, the displayed text equals its target exactly.
//! 3. `Completed` fires at most once per run, and never for a cancelled run.
//! 4. The finalized glyph count never decreases within a run.
//!
//! # Failure Modes
//!
//! - Empty target and empty source: the run completes on its first frame.
//! - Invalid [`ScrambleConfig`]: rejected by [`ScrambleAnimator::with_rng`].

use std::fmt;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use unicode_segmentation::UnicodeSegmentation;

use super::Animation;

/// Symbols drawn for glyphs inside their reveal window.
pub const DEFAULT_ALPHABET: &str = "!<>-_\\/[]{}—=+*^?#________ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Exclusive upper bound for a glyph's first scrambling frame.
pub const DEFAULT_MAX_START_FRAME: u16 = 40;

/// Exclusive upper bound for the length of a glyph's reveal window.
pub const DEFAULT_MAX_DURATION_FRAMES: u16 = 40;

/// Chance per frame that a scrambling glyph picks a new symbol.
pub const DEFAULT_REROLL_PROBABILITY: f64 = 0.28;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for the scramble algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrambleConfig {
    alphabet: Vec<char>,
    max_start_frame: u16,
    max_duration_frames: u16,
    reroll_probability: f64,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            max_start_frame: DEFAULT_MAX_START_FRAME,
            max_duration_frames: DEFAULT_MAX_DURATION_FRAMES,
            reroll_probability: DEFAULT_REROLL_PROBABILITY,
        }
    }
}

impl ScrambleConfig {
    /// Replace the symbol alphabet (builder).
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = alphabet.chars().collect();
        self
    }

    /// Set the exclusive bound for reveal start frames (builder).
    #[must_use]
    pub fn with_max_start_frame(mut self, frames: u16) -> Self {
        self.max_start_frame = frames;
        self
    }

    /// Set the exclusive bound for reveal window lengths (builder).
    #[must_use]
    pub fn with_max_duration_frames(mut self, frames: u16) -> Self {
        self.max_duration_frames = frames;
        self
    }

    /// Set the per-frame re-roll probability (builder).
    #[must_use]
    pub fn with_reroll_probability(mut self, probability: f64) -> Self {
        self.reroll_probability = probability;
        self
    }

    /// Symbols used for scrambling glyphs.
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Upper bound on the number of frames any run can take.
    #[must_use]
    pub fn max_run_frames(&self) -> u32 {
        u32::from(self.max_start_frame) + u32::from(self.max_duration_frames)
    }

    /// Check that every random draw the algorithm makes is well-defined.
    pub fn validate(&self) -> Result<(), ScrambleConfigError> {
        if self.alphabet.is_empty() {
            return Err(ScrambleConfigError::EmptyAlphabet);
        }
        if self.max_start_frame == 0 {
            return Err(ScrambleConfigError::ZeroStartWindow);
        }
        if self.max_duration_frames == 0 {
            return Err(ScrambleConfigError::ZeroDuration);
        }
        if !(0.0..=1.0).contains(&self.reroll_probability) {
            return Err(ScrambleConfigError::InvalidRerollProbability(
                self.reroll_probability,
            ));
        }
        Ok(())
    }

    fn pick_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        if self.alphabet.is_empty() {
            return None;
        }
        Some(self.alphabet[rng.random_range(0..self.alphabet.len())])
    }
}

/// Rejected [`ScrambleConfig`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrambleConfigError {
    /// The symbol alphabet has no characters.
    EmptyAlphabet,
    /// `max_start_frame` is zero, leaving no frame to draw from.
    ZeroStartWindow,
    /// `max_duration_frames` is zero, leaving no length to draw from.
    ZeroDuration,
    /// The re-roll probability is outside [0, 1] (or NaN).
    InvalidRerollProbability(f64),
}

impl fmt::Display for ScrambleConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAlphabet => write!(f, "scramble alphabet is empty"),
            Self::ZeroStartWindow => write!(f, "max start frame must be at least 1"),
            Self::ZeroDuration => write!(f, "max duration frames must be at least 1"),
            Self::InvalidRerollProbability(p) => {
                write!(f, "re-roll probability {p} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ScrambleConfigError {}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Identifies one `start` request on one animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    /// Raw sequence number (1 for the first `start`).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Lifecycle notifications, queued during `start`/`tick` and drained by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleEvent {
    /// The reveal delay elapsed and the run rendered its first frame.
    Started(RunId),
    /// Every glyph is final; the displayed text equals the target.
    Completed(RunId),
    /// The run was superseded or stopped before completing.
    Cancelled(RunId),
}

/// One grapheme slot of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    source: String,
    target: String,
    reveal_start: u16,
    reveal_end: u16,
    current: Option<char>,
}

impl Glyph {
    /// Grapheme shown before the reveal window (empty past the old text).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Grapheme shown once final (empty past the new text).
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// First frame of the reveal window.
    #[must_use]
    pub fn reveal_start(&self) -> u16 {
        self.reveal_start
    }

    /// First frame on which the glyph shows its target.
    #[must_use]
    pub fn reveal_end(&self) -> u16 {
        self.reveal_end
    }

    /// Whether the glyph shows its target on `frame`.
    #[must_use]
    pub fn is_final_at(&self, frame: u32) -> bool {
        frame >= u32::from(self.reveal_end)
    }
}

/// An in-flight transition from one text to another.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    id: RunId,
    target: String,
    glyphs: Vec<Glyph>,
    frame: u32,
    finalized: usize,
}

impl AnimationRun {
    /// Pair `source` and `target` grapheme by grapheme and draw each
    /// glyph's reveal window.
    fn build<R: Rng + ?Sized>(
        id: RunId,
        source: &str,
        target: String,
        config: &ScrambleConfig,
        rng: &mut R,
    ) -> Self {
        let from: Vec<&str> = source.graphemes(true).collect();
        let to: Vec<&str> = target.graphemes(true).collect();
        let len = from.len().max(to.len());

        let glyphs = (0..len)
            .map(|i| {
                let reveal_start = rng.random_range(0..config.max_start_frame);
                let reveal_end =
                    reveal_start.saturating_add(rng.random_range(0..config.max_duration_frames));
                Glyph {
                    source: from.get(i).copied().unwrap_or_default().to_owned(),
                    target: to.get(i).copied().unwrap_or_default().to_owned(),
                    reveal_start,
                    reveal_end,
                    current: None,
                }
            })
            .collect();

        Self {
            id,
            target,
            glyphs,
            frame: 0,
            finalized: 0,
        }
    }

    /// Run identifier.
    #[must_use]
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Text the run resolves to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Glyph slots in index order.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Next frame to render.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Glyphs that were final on the last rendered frame.
    #[must_use]
    pub fn finalized(&self) -> usize {
        self.finalized
    }

    /// Render the current frame into `out`. Returns `true` when every glyph
    /// is final.
    fn render<R: Rng + ?Sized>(
        &mut self,
        out: &mut String,
        config: &ScrambleConfig,
        rng: &mut R,
    ) -> bool {
        out.clear();
        let frame = self.frame;
        let mut complete = 0;

        for glyph in &mut self.glyphs {
            if glyph.is_final_at(frame) {
                complete += 1;
                out.push_str(&glyph.target);
            } else if frame >= u32::from(glyph.reveal_start) {
                if glyph.current.is_none() || rng.random_bool(config.reroll_probability) {
                    glyph.current = config.pick_symbol(rng);
                }
                match glyph.current {
                    Some(symbol) => out.push(symbol),
                    None => out.push_str(&glyph.source),
                }
            } else {
                out.push_str(&glyph.source);
            }
        }

        self.finalized = complete;
        complete == self.glyphs.len()
    }
}

/// Where the animator is in its lifecycle. At most one run exists at a time.
#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Waiting {
        id: RunId,
        remaining: Duration,
        target: String,
    },
    Running(AnimationRun),
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Frame-driven scramble reveal for one piece of text.
///
/// Each rendered string owns its own animator. The random source is a type
/// parameter so tests can pin it with a seed.
#[derive(Debug, Clone)]
pub struct ScrambleAnimator<R = SmallRng> {
    config: ScrambleConfig,
    rng: R,
    displayed: String,
    phase: Phase,
    next_id: u64,
    events: Vec<ScrambleEvent>,
}

impl Default for ScrambleAnimator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrambleAnimator<SmallRng> {
    /// Animator with the default configuration and an OS-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(ScrambleConfig::default(), SmallRng::from_os_rng())
    }

    /// Animator with the default configuration and a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(ScrambleConfig::default(), SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ScrambleAnimator<R> {
    /// Animator with a custom configuration and random source.
    pub fn with_rng(config: ScrambleConfig, rng: R) -> Result<Self, ScrambleConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: ScrambleConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            displayed: String::new(),
            phase: Phase::Idle,
            next_id: 0,
            events: Vec::new(),
        }
    }

    /// Start from `text` instead of the empty string (builder).
    #[must_use]
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.displayed = text.into();
        self
    }

    /// Begin a transition to `text` once `delay` has elapsed.
    ///
    /// Any pending delay or running transition is cancelled first. The new
    /// run pairs `text` with whatever is displayed when the delay ends.
    pub fn start(&mut self, text: impl Into<String>, delay: Duration) -> RunId {
        self.cancel();
        self.next_id += 1;
        let id = RunId(self.next_id);
        let target = text.into();
        crate::debug!(
            run = id.get(),
            delay_ms = delay.as_millis() as u64,
            text = %target,
            "scramble scheduled"
        );
        self.phase = Phase::Waiting {
            id,
            remaining: delay,
            target,
        };
        id
    }

    /// Stop any pending or running transition, keeping the displayed text.
    ///
    /// Returns the cancelled run, if there was one.
    pub fn cancel(&mut self) -> Option<RunId> {
        let id = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => return None,
            Phase::Waiting { id, .. } => id,
            Phase::Running(run) => run.id,
        };
        crate::debug!(run = id.get(), "scramble cancelled");
        self.events.push(ScrambleEvent::Cancelled(id));
        Some(id)
    }

    /// Cancel any transition and display `text` immediately.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.cancel();
        self.displayed = text.into();
    }

    /// The string for the most recently rendered frame.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        &self.displayed
    }

    /// Whether a run is rendering frames (the reveal delay has elapsed).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// Whether a run is waiting for its reveal delay.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Waiting { .. })
    }

    /// The transition currently rendering, if any.
    #[must_use]
    pub fn current_run(&self) -> Option<&AnimationRun> {
        match &self.phase {
            Phase::Running(run) => Some(run),
            _ => None,
        }
    }

    /// Text the animator is heading towards, if a run is pending or active.
    #[must_use]
    pub fn target_text(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Waiting { target, .. } => Some(target),
            Phase::Running(run) => Some(&run.target),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    /// Drain all pending lifecycle events. Clears the queue.
    pub fn drain_events(&mut self) -> Vec<ScrambleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued lifecycle events.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Render one frame of `run`, returning the phase that follows it.
    fn step(&mut self, mut run: AnimationRun) -> Phase {
        let done = run.render(&mut self.displayed, &self.config, &mut self.rng);
        crate::trace!(
            run = run.id.get(),
            frame = run.frame,
            finalized = run.finalized,
            glyphs = run.glyphs.len(),
            "scramble frame"
        );
        if done {
            crate::debug!(run = run.id.get(), frames = run.frame + 1, "scramble complete");
            self.events.push(ScrambleEvent::Completed(run.id));
            Phase::Idle
        } else {
            run.frame += 1;
            Phase::Running(run)
        }
    }
}

impl<R: Rng> Animation for ScrambleAnimator<R> {
    fn tick(&mut self, dt: Duration) {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Phase::Idle,
            Phase::Waiting {
                id,
                remaining,
                target,
            } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    let run = AnimationRun::build(
                        id,
                        &self.displayed,
                        target,
                        &self.config,
                        &mut self.rng,
                    );
                    crate::debug!(run = id.get(), glyphs = run.glyphs.len(), "scramble started");
                    self.events.push(ScrambleEvent::Started(id));
                    self.step(run)
                } else {
                    Phase::Waiting {
                        id,
                        remaining,
                        target,
                    }
                }
            }
            Phase::Running(run) => self.step(run),
        };
    }

    fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    fn value(&self) -> f32 {
        match &self.phase {
            Phase::Idle => 1.0,
            Phase::Waiting { .. } => 0.0,
            Phase::Running(run) if run.glyphs.is_empty() => 1.0,
            Phase::Running(run) => (run.finalized as f32 / run.glyphs.len() as f32).clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Stateless helper
// ---------------------------------------------------------------------------

/// Scramble `text` at a given reveal `progress` in [0, 1].
///
/// The first `floor(len * progress)` graphemes are shown as-is, spaces are
/// always kept, and every other grapheme becomes a random symbol from
/// `config`'s alphabet. Suited to decorative text driven by a plain
/// progress value rather than a frame-by-frame run.
pub fn scramble_at_progress<R: Rng + ?Sized>(
    text: &str,
    progress: f64,
    config: &ScrambleConfig,
    rng: &mut R,
) -> String {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let revealed = (graphemes.len() as f64 * progress).floor() as usize;

    let mut out = String::with_capacity(text.len());
    for (i, g) in graphemes.iter().enumerate() {
        if i < revealed || *g == " " {
            out.push_str(g);
        } else {
            match config.pick_symbol(rng) {
                Some(symbol) => out.push(symbol),
                None => out.push_str(g),
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
