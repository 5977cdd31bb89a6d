//! Step pacing
//!
//! Patterns advance in discrete steps. A step fires once the configured
//! interval has elapsed since the previous one; the interval may scale with
//! the externally controlled speed.

use embassy_time::{Duration, Instant};

/// Highest accepted speed value
pub const MAX_SPEED: u8 = 10;

/// Lower bound for any speed-scaled interval
pub const MIN_INTERVAL: Duration = Duration::from_millis(15);

/// Scale `base` by speed: `base * (1.6 - 0.12 * speed)`, never below [`MIN_INTERVAL`]
///
/// Speed 0 is the slowest (160% of base), speed 10 the fastest (40%).
/// Integer math keeps the result exact across targets.
pub const fn adjusted_interval(base: Duration, speed: u8) -> Duration {
    let speed = if speed > MAX_SPEED { MAX_SPEED } else { speed };
    let percent = 160 - 12 * speed as u64;
    let ms = base.as_millis() * percent / 100;
    if ms < MIN_INTERVAL.as_millis() {
        MIN_INTERVAL
    } else {
        Duration::from_millis(ms)
    }
}

/// How a pattern derives its step interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Same interval regardless of speed
    Fixed(Duration),
    /// Base interval scaled by [`adjusted_interval`]
    Scaled(Duration),
}

impl Pacing {
    pub const fn interval(self, speed: u8) -> Duration {
        match self {
            Self::Fixed(interval) => interval,
            Self::Scaled(base) => adjusted_interval(base, speed),
        }
    }
}

/// Step pacing for every animated pattern
#[derive(Debug, Clone, Copy)]
pub struct PatternTimings {
    /// Snake movement
    pub snake: Pacing,
    /// Scrolling text, one pixel per step
    pub scroll: Pacing,
    /// Error blink toggle
    pub blink: Pacing,
    /// Diagnostic frames
    pub self_test: Pacing,
}

impl Default for PatternTimings {
    fn default() -> Self {
        Self {
            snake: Pacing::Fixed(Duration::from_millis(300)),
            scroll: Pacing::Scaled(Duration::from_millis(80)),
            blink: Pacing::Scaled(Duration::from_millis(200)),
            self_test: Pacing::Scaled(Duration::from_millis(120)),
        }
    }
}

/// Rate limiter driven by a free-running millisecond counter
///
/// Only the low 32 bits of the clock are kept, like a hardware `millis()`
/// counter; elapsed time uses wrapping subtraction so a counter rollover
/// does not stall the pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimer {
    last_step: Option<u32>,
}

impl StepTimer {
    pub const fn new() -> Self {
        Self { last_step: None }
    }

    /// Forget the last step; the next check fires immediately
    pub fn reset(&mut self) {
        self.last_step = None;
    }

    /// Returns true and records `now` if `interval` has elapsed
    #[allow(clippy::cast_possible_truncation)]
    pub fn is_due(&mut self, now: Instant, interval: Duration) -> bool {
        let now_ms = now.as_millis() as u32;
        if let Some(last) = self.last_step {
            let elapsed = u64::from(now_ms.wrapping_sub(last));
            if elapsed < interval.as_millis() {
                return false;
            }
        }
        self.last_step = Some(now_ms);
        true
    }
}
