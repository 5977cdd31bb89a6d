//! Horizontally scrolling text
//!
//! The message enters from the right edge and moves one pixel left per step.

use super::{Pattern, Step};
use crate::font::{draw, measure};
use crate::rng::Rng;
use crate::surface::MatrixSurface;
use crate::timing::{Pacing, PatternTimings};

/// What happens once the message has left the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Start over from the right edge
    #[default]
    Loop,
    /// Report completion
    OneShot,
}

#[derive(Debug, Clone)]
pub struct ScrollingTextPattern {
    message: &'static str,
    /// X position of the first glyph column
    offset: i32,
    /// Where the message re-enters, the surface width
    start: i32,
    mode: ScrollMode,
}

impl ScrollingTextPattern {
    /// Create a scroll positioned just off the right edge of a `W` wide surface
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new<const W: usize>(message: &'static str, mode: ScrollMode) -> Self {
        Self {
            message,
            offset: W as i32,
            start: W as i32,
            mode,
        }
    }

    pub const fn offset(&self) -> i32 {
        self.offset
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }

    pub const fn mode(&self) -> ScrollMode {
        self.mode
    }
}

impl Pattern for ScrollingTextPattern {
    fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, _rng: &mut Rng) -> Step {
        surface.clear();
        draw(surface, self.offset, 0, self.message);

        self.offset -= 1;
        if self.offset < -measure(self.message) {
            match self.mode {
                ScrollMode::Loop => self.offset = self.start,
                ScrollMode::OneShot => return Step::Complete,
            }
        }
        Step::Continue
    }

    fn pacing(&self, timings: &PatternTimings) -> Pacing {
        timings.scroll
    }
}
