//! Blinking centered text

use super::{Pattern, Step};
use crate::font::draw_centered;
use crate::rng::Rng;
use crate::surface::MatrixSurface;
use crate::timing::{Pacing, PatternTimings};

/// Shows the text on every other step
#[derive(Debug, Clone)]
pub struct BlinkPattern {
    text: &'static str,
    visible: bool,
}

impl BlinkPattern {
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            visible: false,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Pattern for BlinkPattern {
    fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, _rng: &mut Rng) -> Step {
        self.visible = !self.visible;
        if self.visible {
            draw_centered(surface, self.text);
        } else {
            surface.clear();
        }
        Step::Continue
    }

    fn pacing(&self, timings: &PatternTimings) -> Pacing {
        timings.blink
    }
}
