use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::MatrixDriver;
use crate::pattern::{PatternId, PatternMessages, PatternSlot, ScrollMode, Step};
use crate::rng::Rng;
use crate::surface::{MatrixSurface, Orientation};
use crate::timing::{PatternTimings, StepTimer};

/// Configuration for the pattern engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub timings: PatternTimings,
    pub messages: PatternMessages,
    /// Whether `FINISH` loops forever or scrolls once and stops
    pub finish_mode: ScrollMode,
    pub orientation: Orientation,
    /// Seed for snake steering and food placement
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timings: PatternTimings::default(),
            messages: PatternMessages::default(),
            finish_mode: ScrollMode::Loop,
            orientation: Orientation::Normal,
            seed: 0x2F6B_9A31,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternEvent {
    /// A one-shot pattern finished and the engine went back to `None`
    Completed(PatternId),
}

/// Pattern Engine - owns the framebuffer and the active pattern
///
/// `W` is the panel width in columns (chained modules times eight).
pub struct PatternEngine<D: MatrixDriver, const W: usize> {
    // External dependencies and configuration
    driver: D,
    timings: PatternTimings,
    messages: PatternMessages,
    finish_mode: ScrollMode,
    orientation: Orientation,

    // Internal state
    surface: MatrixSurface<W>,
    slot: PatternSlot,
    timer: StepTimer,
    rng: Rng,
}

impl<D: MatrixDriver, const W: usize> PatternEngine<D, W> {
    pub fn new(driver: D, config: &EngineConfig) -> Self {
        Self {
            driver,
            timings: config.timings,
            messages: config.messages,
            finish_mode: config.finish_mode,
            orientation: config.orientation,
            surface: MatrixSurface::new(),
            slot: PatternSlot::None,
            timer: StepTimer::new(),
            rng: Rng::new(config.seed),
        }
    }

    /// Switch to `pattern`, discarding whatever was running
    ///
    /// The panel is blanked immediately; the first frame of the new pattern
    /// is drawn on the next tick.
    pub fn start(&mut self, pattern: PatternId) {
        #[cfg(feature = "esp32-log")]
        println!("[engine] pattern {} -> {}", self.slot.id(), pattern);

        self.timer.reset();
        self.surface.clear();
        self.driver.clear();
        self.flush();
        self.slot = pattern.to_slot::<W>(&self.messages, self.finish_mode, &mut self.rng);
    }

    /// Advance the active pattern if its step interval has elapsed
    ///
    /// This is the main animation step. Call this once per loop iteration.
    pub fn tick(&mut self, now: Instant, speed: u8) -> Option<PatternEvent> {
        let pacing = self.slot.pacing(&self.timings)?;
        if !self.timer.is_due(now, pacing.interval(speed)) {
            return None;
        }

        let step = self.slot.step(&mut self.surface, &mut self.rng);
        match step {
            Step::Continue => {
                self.flush();
                None
            }
            Step::Complete => {
                let finished = self.slot.id();
                #[cfg(feature = "esp32-log")]
                println!("[engine] pattern {} complete", finished);
                self.start(PatternId::None);
                Some(PatternEvent::Completed(finished))
            }
        }
    }

    /// Currently active pattern
    pub fn current(&self) -> PatternId {
        self.slot.id()
    }

    pub fn slot(&self) -> &PatternSlot {
        &self.slot
    }

    pub fn surface(&self) -> &MatrixSurface<W> {
        &self.surface
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Forward a brightness level to the panel
    pub fn set_intensity(&mut self, level: u8) {
        self.driver.set_intensity(level);
    }

    /// Push the surface to the panel
    pub fn flush(&mut self) {
        self.surface.flush(&mut self.driver, self.orientation);
    }
}
