//! Command processing module
//!
//! Applies parsed command lines to the pattern engine and controller state.

use crate::MatrixDriver;
use crate::command::{Command, CommandError, Response};
use crate::engine::PatternEngine;
use crate::pattern::PatternId;
use crate::state::ControllerState;

/// Turns command lines into engine/state changes and response lines
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInterpreter {
    /// Emit `PATTERN=<NAME>` before the `OK` of a pattern switch
    announce_patterns: bool,
}

impl CommandInterpreter {
    pub const fn new(announce_patterns: bool) -> Self {
        Self { announce_patterns }
    }

    /// Process one line, passing every resulting output line to `emit`
    ///
    /// Blank lines produce no output. Rejected lines never mutate anything.
    pub fn handle<D: MatrixDriver, const W: usize>(
        &self,
        line: &str,
        engine: &mut PatternEngine<D, W>,
        state: &mut ControllerState,
        mut emit: impl FnMut(Response),
    ) {
        match Command::parse(line) {
            Ok(command) => self.execute(command, engine, state, &mut emit),
            Err(CommandError::Empty) => {}
            Err(error) => emit(Response::Error(error)),
        }
    }

    /// Apply an already parsed command
    pub fn execute<D: MatrixDriver, const W: usize>(
        &self,
        command: Command,
        engine: &mut PatternEngine<D, W>,
        state: &mut ControllerState,
        emit: &mut impl FnMut(Response),
    ) {
        let response = match command {
            Command::Pattern(pattern) => {
                self.switch(pattern, engine, emit);
                Response::Ok
            }
            Command::Stop => {
                self.switch(PatternId::None, engine, emit);
                Response::Ok
            }
            Command::Speed(value) => Response::Speed(state.set_speed(value)),
            Command::Bright(value) => {
                let brightness = state.set_brightness(value);
                engine.set_intensity(brightness);
                Response::Bright(brightness)
            }
            Command::Status => Response::Status {
                pattern: engine.current(),
                speed: state.speed(),
                brightness: state.brightness(),
            },
            Command::Help => Response::Help,
        };
        emit(response);
    }

    fn switch<D: MatrixDriver, const W: usize>(
        &self,
        pattern: PatternId,
        engine: &mut PatternEngine<D, W>,
        emit: &mut impl FnMut(Response),
    ) {
        engine.start(pattern);
        if self.announce_patterns {
            emit(Response::PatternStarted(pattern));
        }
    }
}
