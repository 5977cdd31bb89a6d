//! Controller loop
//!
//! Ties the serial port, the command interpreter and the pattern engine
//! together without async/await or platform-specific timers. Each
//! [`Controller::poll`] call:
//! 1. Drains every byte the port has ready and executes completed lines
//! 2. Ticks the pattern engine once
//!
//! Commands therefore always take effect before the next animation step.
//!
//! # Usage
//!
//! ```ignore
//! let mut controller = Controller::<_, _, 32>::new(driver, uart, &ControllerConfig::default());
//! controller.boot()?;
//!
//! loop {
//!     controller.poll(Instant::now());
//! }
//! ```

use core::fmt::Write as _;

use embassy_time::Instant;
use embedded_io::{Read, ReadReady, Write};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::Response;
use crate::engine::{EngineConfig, PatternEngine, PatternEvent};
use crate::interpreter::CommandInterpreter;
use crate::line_buffer::{LINE_CAPACITY, LineBuffer};
use crate::pattern::PatternId;
use crate::state::{ControllerState, DEFAULT_BRIGHTNESS, DEFAULT_SPEED};
use crate::{DriverError, MatrixDriver};

/// Bytes pulled from the port per read call
const READ_CHUNK: usize = 16;

/// Longest response line, terminator included
const RESPONSE_CAPACITY: usize = 192;

/// Configuration for the controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub engine: EngineConfig,
    /// Initial speed (0-10)
    pub speed: u8,
    /// Initial brightness (0-15)
    pub brightness: u8,
    /// Emit `PATTERN=<NAME>` whenever a command switches patterns
    pub announce_patterns: bool,
    /// Print the ready banner after a successful boot
    pub banner: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            speed: DEFAULT_SPEED,
            brightness: DEFAULT_BRIGHTNESS,
            announce_patterns: false,
            banner: true,
        }
    }
}

/// Lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, `boot` not called yet
    Booting,
    /// Processing commands and animating
    Running,
    /// The display failed to start; nothing is processed anymore
    Halted,
}

/// Fatal startup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    Display(DriverError),
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(error) => write!(f, "display initialization failed: {error}"),
        }
    }
}

impl From<DriverError> for BootError {
    fn from(error: DriverError) -> Self {
        Self::Display(error)
    }
}

/// Single-threaded controller owning the port, the engine and the state
pub struct Controller<D, P, const W: usize>
where
    D: MatrixDriver,
    P: Read + ReadReady + Write,
{
    port: P,
    engine: PatternEngine<D, W>,
    state: ControllerState,
    interpreter: CommandInterpreter,
    lines: LineBuffer<LINE_CAPACITY>,
    phase: Phase,
    banner: bool,
}

impl<D, P, const W: usize> Controller<D, P, W>
where
    D: MatrixDriver,
    P: Read + ReadReady + Write,
{
    pub fn new(driver: D, port: P, config: &ControllerConfig) -> Self {
        Self {
            port,
            engine: PatternEngine::new(driver, &config.engine),
            state: ControllerState::new(config.speed, config.brightness),
            interpreter: CommandInterpreter::new(config.announce_patterns),
            lines: LineBuffer::new(),
            phase: Phase::Booting,
            banner: config.banner,
        }
    }

    /// Bring up the display and blank it
    ///
    /// A display that fails to start halts the controller for good.
    pub fn boot(&mut self) -> Result<(), BootError> {
        if let Err(error) = self.engine.driver_mut().begin() {
            #[cfg(feature = "esp32-log")]
            println!("[controller] display init failed: {}", error);
            self.phase = Phase::Halted;
            write_line(&mut self.port, &Response::DisplayInitFailed);
            return Err(error.into());
        }

        self.engine.set_intensity(self.state.brightness());
        self.engine.start(PatternId::None);
        self.phase = Phase::Running;

        if self.banner {
            write_line(&mut self.port, &Response::Ready);
        }
        Ok(())
    }

    /// Run one loop iteration: drain input, then tick the engine
    ///
    /// Does nothing unless the controller booted successfully.
    pub fn poll(&mut self, now: Instant) -> Option<PatternEvent> {
        if self.phase != Phase::Running {
            return None;
        }

        self.drain_input();

        let event = self.engine.tick(now, self.state.speed());
        if let Some(PatternEvent::Completed(pattern)) = event {
            write_line(&mut self.port, &Response::PatternCompleted(pattern));
        }
        event
    }

    /// Boot and poll forever against the system clock
    ///
    /// A failed boot parks the CPU; rendering without a display is pointless.
    pub fn run(mut self) -> ! {
        if self.boot().is_err() {
            loop {
                core::hint::spin_loop();
            }
        }
        loop {
            self.poll(Instant::now());
        }
    }

    fn drain_input(&mut self) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.port.read_ready() {
                Ok(true) => {}
                Ok(false) => break,
                Err(_error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[controller] serial read_ready error: {:?}", _error);
                    break;
                }
            }

            let count = match self.port.read(&mut chunk) {
                Ok(0) => break,
                Ok(count) => count,
                Err(_error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[controller] serial read error: {:?}", _error);
                    break;
                }
            };

            for &byte in &chunk[..count] {
                if let Some(line) = self.lines.push(byte) {
                    self.dispatch(&line);
                }
            }
        }
    }

    fn dispatch(&mut self, line: &str) {
        let Self {
            port,
            engine,
            state,
            interpreter,
            ..
        } = self;
        interpreter.handle(line, engine, state, |response| write_line(port, &response));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn engine(&self) -> &PatternEngine<D, W> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PatternEngine<D, W> {
        &mut self.engine
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

/// Format `response` and write it as one `\n` terminated line
///
/// Write errors drop the line; there is nothing useful to retry.
fn write_line<P: Write>(port: &mut P, response: &Response) {
    let mut line = heapless::String::<RESPONSE_CAPACITY>::new();
    if write!(line, "{response}").is_err() || line.push('\n').is_err() {
        return;
    }
    if let Err(_error) = port.write_all(line.as_bytes()) {
        #[cfg(feature = "esp32-log")]
        println!("[controller] serial write error: {:?}", _error);
        return;
    }
    if let Err(_error) = port.flush() {
        #[cfg(feature = "esp32-log")]
        println!("[controller] serial flush error: {:?}", _error);
    }
}
