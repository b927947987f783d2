//! Property-based invariant tests for the scramble animator.
//!
//! Transient frames are random by construction, so these tests assert the
//! shape of a run rather than exact intermediate strings:
//!
//! 1. A completed run displays exactly its target and is no longer animating.
//! 2. Restarting mid-run always ends on the latest target, never a mix.
//! 3. The finalized glyph count never decreases within a run.
//! 4. Runs finish within `max_run_frames` ticks of the delay elapsing.
//! 5. Glyph count is `max(len(source), len(target))` in graphemes.
//! 6. Completion fires exactly once per uncancelled run.

use std::time::Duration;

use folio_core::animation::{Animation, ScrambleAnimator, ScrambleEvent};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

const FRAME: Duration = Duration::from_millis(16);
const LIMIT: u32 = 500;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z /]{0,32}",
        "\\PC{0,16}",
        Just(String::new()),
    ]
}

fn drive(anim: &mut ScrambleAnimator) -> u32 {
    let mut frames = 0;
    while !anim.is_complete() && frames < LIMIT {
        anim.tick(FRAME);
        frames += 1;
    }
    frames
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Completed runs show the target exactly
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn completed_run_displays_target(
        seed in any::<u64>(),
        source in text_strategy(),
        target in text_strategy(),
    ) {
        let mut anim = ScrambleAnimator::with_seed(seed).with_initial_text(source);
        anim.start(target.clone(), Duration::ZERO);
        drive(&mut anim);
        prop_assert!(anim.is_complete());
        prop_assert!(!anim.is_animating());
        prop_assert_eq!(anim.displayed_text(), target.as_str());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Re-entrant start never corrupts the result
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn restart_ends_on_latest_target(
        seed in any::<u64>(),
        first in text_strategy(),
        second in text_strategy(),
        frames_before_restart in 0u32..90,
        delay_ms in 0u64..64,
    ) {
        let mut anim = ScrambleAnimator::with_seed(seed);
        anim.start(first, Duration::from_millis(delay_ms));
        for _ in 0..frames_before_restart {
            anim.tick(FRAME);
        }
        anim.start(second.clone(), Duration::from_millis(delay_ms));
        drive(&mut anim);
        prop_assert_eq!(anim.displayed_text(), second.as_str());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4 + 5. Run shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn run_shape_is_well_formed(
        seed in any::<u64>(),
        source in text_strategy(),
        target in text_strategy(),
    ) {
        let expected_len = source
            .graphemes(true)
            .count()
            .max(target.graphemes(true).count());
        let mut anim = ScrambleAnimator::with_seed(seed).with_initial_text(source);
        anim.start(target, Duration::ZERO);
        let bound = anim.config().max_run_frames();

        let mut last_finalized = 0;
        let mut frames = 0;
        while !anim.is_complete() {
            anim.tick(FRAME);
            frames += 1;
            prop_assert!(frames <= bound, "run exceeded {} frames", bound);
            if let Some(run) = anim.current_run() {
                prop_assert_eq!(run.glyphs().len(), expected_len);
                prop_assert!(run.finalized() >= last_finalized);
                last_finalized = run.finalized();
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Completion fires exactly once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn completion_fires_exactly_once(
        seed in any::<u64>(),
        target in text_strategy(),
        extra_ticks in 0u32..20,
    ) {
        let mut anim = ScrambleAnimator::with_seed(seed);
        let id = anim.start(target, Duration::ZERO);
        drive(&mut anim);
        for _ in 0..extra_ticks {
            anim.tick(FRAME);
        }
        let events = anim.drain_events();
        let completions = events
            .iter()
            .filter(|e| **e == ScrambleEvent::Completed(id))
            .count();
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(events.first(), Some(&ScrambleEvent::Started(id)));
    }
}
