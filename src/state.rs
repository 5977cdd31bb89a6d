//! Controller-wide settings changed over the command line

use crate::timing::MAX_SPEED;

/// Highest accepted brightness value
pub const MAX_BRIGHTNESS: u8 = 15;

pub const DEFAULT_SPEED: u8 = 5;
pub const DEFAULT_BRIGHTNESS: u8 = 7;

/// Animation speed and panel brightness
///
/// Setters clamp out-of-range values instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    speed: u8,
    brightness: u8,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, DEFAULT_BRIGHTNESS)
    }
}

impl ControllerState {
    pub fn new(speed: u8, brightness: u8) -> Self {
        Self {
            speed: speed.min(MAX_SPEED),
            brightness: brightness.min(MAX_BRIGHTNESS),
        }
    }

    pub const fn speed(&self) -> u8 {
        self.speed
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Store `value` clamped to `0..=10` and return the stored speed
    pub fn set_speed(&mut self, value: i32) -> u8 {
        self.speed = clamp_to(value, MAX_SPEED);
        self.speed
    }

    /// Store `value` clamped to `0..=15` and return the stored brightness
    pub fn set_brightness(&mut self, value: i32) -> u8 {
        self.brightness = clamp_to(value, MAX_BRIGHTNESS);
        self.brightness
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to(value: i32, max: u8) -> u8 {
    value.clamp(0, i32::from(max)) as u8
}
