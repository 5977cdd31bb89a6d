//! Pattern system with compile-time known pattern variants
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern implements the `Pattern` trait.

mod blink;
mod scroll;
mod self_test;
mod snake;

pub use blink::BlinkPattern;
pub use scroll::{ScrollMode, ScrollingTextPattern};
pub use self_test::{SelfTestPattern, SelfTestStage};
pub use snake::{SNAKE_LENGTH, SnakePattern};

use crate::rng::Rng;
use crate::surface::MatrixSurface;
use crate::timing::{Pacing, PatternTimings};

const PATTERN_NAME_NONE: &str = "NONE";
const PATTERN_NAME_BORED: &str = "BORED";
const PATTERN_NAME_THINKING: &str = "THINKING";
const PATTERN_NAME_PRINTING: &str = "PRINTING";
const PATTERN_NAME_FINISH: &str = "FINISH";
const PATTERN_NAME_REMOVE_FIGURE: &str = "REMOVE_FIGURE";
const PATTERN_NAME_ERROR: &str = "ERROR";
const PATTERN_NAME_SELF_TEST: &str = "SELFTEST";

const PATTERN_ID_NONE: u8 = 0;
const PATTERN_ID_BORED: u8 = 1;
const PATTERN_ID_THINKING: u8 = 2;
const PATTERN_ID_FINISH: u8 = 3;
const PATTERN_ID_REMOVE_FIGURE: u8 = 4;
const PATTERN_ID_ERROR: u8 = 5;
const PATTERN_ID_SELF_TEST: u8 = 6;

/// Result of a single pattern step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The pattern keeps running
    Continue,
    /// A one-shot pattern has shown its last frame
    Complete,
}

pub trait Pattern {
    /// Advance one step and draw the resulting frame into `surface`
    fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, rng: &mut Rng) -> Step;

    /// Pacing used between steps
    fn pacing(&self, timings: &PatternTimings) -> Pacing;
}

/// Texts shown by the text-based patterns
#[derive(Debug, Clone, Copy)]
pub struct PatternMessages {
    pub thinking: &'static str,
    pub finish: &'static str,
    pub remove_figure: &'static str,
    pub error: &'static str,
}

impl Default for PatternMessages {
    fn default() -> Self {
        Self {
            thinking: "THINKING   ",
            finish: "- THANK YOU FOR THE VISIT -   ",
            remove_figure: "PLEASE REMOVE FIGURE   ",
            error: "ERROR",
        }
    }
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PatternId {
    #[default]
    None = PATTERN_ID_NONE,
    Bored = PATTERN_ID_BORED,
    Thinking = PATTERN_ID_THINKING,
    Finish = PATTERN_ID_FINISH,
    RemoveFigure = PATTERN_ID_REMOVE_FIGURE,
    Error = PATTERN_ID_ERROR,
    SelfTest = PATTERN_ID_SELF_TEST,
}

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_NONE => Self::None,
            PATTERN_ID_BORED => Self::Bored,
            PATTERN_ID_THINKING => Self::Thinking,
            PATTERN_ID_FINISH => Self::Finish,
            PATTERN_ID_REMOVE_FIGURE => Self::RemoveFigure,
            PATTERN_ID_ERROR => Self::Error,
            PATTERN_ID_SELF_TEST => Self::SelfTest,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => PATTERN_NAME_NONE,
            Self::Bored => PATTERN_NAME_BORED,
            Self::Thinking => PATTERN_NAME_THINKING,
            Self::Finish => PATTERN_NAME_FINISH,
            Self::RemoveFigure => PATTERN_NAME_REMOVE_FIGURE,
            Self::Error => PATTERN_NAME_ERROR,
            Self::SelfTest => PATTERN_NAME_SELF_TEST,
        }
    }

    /// Parse a pattern name as accepted by `PATTERN <NAME>`
    ///
    /// `PRINTING` is an alias for `THINKING`. `NONE` is not selectable by
    /// name; use `STOP` instead.
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_BORED => Some(Self::Bored),
            PATTERN_NAME_THINKING | PATTERN_NAME_PRINTING => Some(Self::Thinking),
            PATTERN_NAME_FINISH => Some(Self::Finish),
            PATTERN_NAME_REMOVE_FIGURE => Some(Self::RemoveFigure),
            PATTERN_NAME_ERROR => Some(Self::Error),
            PATTERN_NAME_SELF_TEST => Some(Self::SelfTest),
            _ => None,
        }
    }

    /// Build fresh pattern state for a surface `W` columns wide
    pub fn to_slot<const W: usize>(
        self,
        messages: &PatternMessages,
        finish_mode: ScrollMode,
        rng: &mut Rng,
    ) -> PatternSlot {
        match self {
            Self::None => PatternSlot::None,
            Self::Bored => PatternSlot::Bored(SnakePattern::new::<W>(rng)),
            Self::Thinking => PatternSlot::Thinking(ScrollingTextPattern::new::<W>(
                messages.thinking,
                ScrollMode::Loop,
            )),
            Self::Finish => {
                PatternSlot::Finish(ScrollingTextPattern::new::<W>(messages.finish, finish_mode))
            }
            Self::RemoveFigure => PatternSlot::RemoveFigure(ScrollingTextPattern::new::<W>(
                messages.remove_figure,
                ScrollMode::Loop,
            )),
            Self::Error => PatternSlot::Error(BlinkPattern::new(messages.error)),
            Self::SelfTest => PatternSlot::SelfTest(SelfTestPattern::new()),
        }
    }
}

impl core::fmt::Display for PatternId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern slot - enum containing the live state of the active pattern
#[derive(Debug, Clone, Default)]
pub enum PatternSlot {
    /// Nothing is animated, the panel stays dark
    #[default]
    None,
    /// Food-seeking snake
    Bored(SnakePattern),
    /// Scrolling "thinking" message
    Thinking(ScrollingTextPattern),
    /// Scrolling farewell message
    Finish(ScrollingTextPattern),
    /// Scrolling "remove figure" prompt
    RemoveFigure(ScrollingTextPattern),
    /// Blinking error text
    Error(BlinkPattern),
    /// Hardware diagnostic sequence
    SelfTest(SelfTestPattern),
}

impl PatternSlot {
    /// Get the pattern ID for external observation
    pub fn id(&self) -> PatternId {
        match self {
            Self::None => PatternId::None,
            Self::Bored(_) => PatternId::Bored,
            Self::Thinking(_) => PatternId::Thinking,
            Self::Finish(_) => PatternId::Finish,
            Self::RemoveFigure(_) => PatternId::RemoveFigure,
            Self::Error(_) => PatternId::Error,
            Self::SelfTest(_) => PatternId::SelfTest,
        }
    }

    /// Pacing of the active pattern, `None` when idle
    pub fn pacing(&self, timings: &PatternTimings) -> Option<Pacing> {
        Some(match self {
            Self::None => return None,
            Self::Bored(pattern) => pattern.pacing(timings),
            Self::Thinking(pattern) | Self::Finish(pattern) | Self::RemoveFigure(pattern) => {
                pattern.pacing(timings)
            }
            Self::Error(pattern) => pattern.pacing(timings),
            Self::SelfTest(pattern) => pattern.pacing(timings),
        })
    }

    /// Advance the active pattern by one step
    pub fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, rng: &mut Rng) -> Step {
        match self {
            Self::None => Step::Continue,
            Self::Bored(pattern) => pattern.step(surface, rng),
            Self::Thinking(pattern) | Self::Finish(pattern) | Self::RemoveFigure(pattern) => {
                pattern.step(surface, rng)
            }
            Self::Error(pattern) => pattern.step(surface, rng),
            Self::SelfTest(pattern) => pattern.step(surface, rng),
        }
    }
}
