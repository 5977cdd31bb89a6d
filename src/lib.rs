#![no_std]

pub mod bounds;
pub mod command;
pub mod controller;
pub mod engine;
pub mod font;
pub mod interpreter;
pub mod line_buffer;
pub mod pattern;
pub mod rng;
pub mod state;
pub mod surface;
pub mod timing;

pub use command::{Command, CommandError, Response};
pub use controller::{BootError, Controller, ControllerConfig, Phase};
pub use engine::{EngineConfig, PatternEngine, PatternEvent};
pub use interpreter::CommandInterpreter;
pub use line_buffer::LineBuffer;
pub use pattern::{PatternId, PatternMessages, PatternSlot, ScrollMode};
pub use state::ControllerState;
pub use surface::{MATRIX_HEIGHT, MODULE_WIDTH, MatrixSurface, Orientation};
pub use timing::{Pacing, PatternTimings, adjusted_interval};

pub use embassy_time::{Duration, Instant};

/// Errors reported by a matrix driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The driver chip did not answer during initialization
    NotResponding,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotResponding => f.write_str("display not responding"),
        }
    }
}

/// Abstract dot-matrix driver trait
///
/// Implement this trait to support different hardware platforms.
/// The pattern engine is generic over this trait and only ever writes
/// whole frames: every point of the surface followed by `update`.
pub trait MatrixDriver {
    /// Initialize the hardware. Called once at boot.
    fn begin(&mut self) -> Result<(), DriverError>;

    /// Clear the driver's own frame buffer. Called when a pattern starts.
    fn clear(&mut self);

    /// Set a single point. Row 0 is the top physical row.
    fn set_point(&mut self, row: usize, col: usize, on: bool);

    /// Push the driver's frame buffer to the panel
    fn update(&mut self);

    /// Set panel intensity (0-15)
    fn set_intensity(&mut self, level: u8);
}
