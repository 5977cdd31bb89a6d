//! Hardware diagnostic sequence
//!
//! Walks through frames that make wiring and orientation mistakes obvious:
//! everything on, each row, each column, each module, a checkerboard and the
//! four corners. Static frames are held for a few steps. The sequence runs
//! once and then reports completion.

use super::{Pattern, Step};
use crate::rng::Rng;
use crate::surface::{MATRIX_HEIGHT, MODULE_WIDTH, MatrixSurface};
use crate::timing::{Pacing, PatternTimings};

/// Steps a static frame stays on the panel
const HOLD_STEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestStage {
    AllOn,
    Rows,
    Columns,
    Modules,
    Checkerboard,
    Corners,
}

impl SelfTestStage {
    const fn next(self) -> Option<Self> {
        match self {
            Self::AllOn => Some(Self::Rows),
            Self::Rows => Some(Self::Columns),
            Self::Columns => Some(Self::Modules),
            Self::Modules => Some(Self::Checkerboard),
            Self::Checkerboard => Some(Self::Corners),
            Self::Corners => None,
        }
    }

    /// Number of steps spent in this stage on a `width` wide panel
    pub const fn frames(self, width: usize) -> usize {
        match self {
            Self::AllOn | Self::Checkerboard | Self::Corners => HOLD_STEPS,
            Self::Rows => MATRIX_HEIGHT,
            Self::Columns => width,
            Self::Modules => width.div_ceil(MODULE_WIDTH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfTestPattern {
    /// `None` once every stage has been shown
    stage: Option<SelfTestStage>,
    frame: usize,
}

impl Default for SelfTestPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl SelfTestPattern {
    pub const fn new() -> Self {
        Self {
            stage: Some(SelfTestStage::AllOn),
            frame: 0,
        }
    }

    pub const fn stage(&self) -> Option<SelfTestStage> {
        self.stage
    }

    /// Total number of steps before completion is reported
    pub fn total_steps(width: usize) -> usize {
        let mut stage = Some(SelfTestStage::AllOn);
        let mut total = 0;
        while let Some(current) = stage {
            total += current.frames(width);
            stage = current.next();
        }
        total + 1
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn render<const W: usize>(stage: SelfTestStage, frame: usize, surface: &mut MatrixSurface<W>) {
        surface.clear();
        let last_col = W as i32 - 1;
        let last_row = MATRIX_HEIGHT as i32 - 1;
        for row in 0..MATRIX_HEIGHT as i32 {
            for col in 0..W as i32 {
                let on = match stage {
                    SelfTestStage::AllOn => true,
                    SelfTestStage::Rows => row == frame as i32,
                    SelfTestStage::Columns => col == frame as i32,
                    SelfTestStage::Modules => col as usize / MODULE_WIDTH == frame,
                    SelfTestStage::Checkerboard => (row + col) % 2 == 0,
                    SelfTestStage::Corners => {
                        (row == 0 || row == last_row) && (col == 0 || col == last_col)
                    }
                };
                surface.set(row, col, on);
            }
        }
    }
}

impl Pattern for SelfTestPattern {
    fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, _rng: &mut Rng) -> Step {
        let Some(stage) = self.stage else {
            return Step::Complete;
        };

        Self::render(stage, self.frame, surface);

        self.frame += 1;
        if self.frame >= stage.frames(W) {
            self.frame = 0;
            self.stage = stage.next();
        }
        Step::Continue
    }

    fn pacing(&self, timings: &PatternTimings) -> Pacing {
        timings.self_test
    }
}
