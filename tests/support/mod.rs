#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use matrix_pattern_composer::{DriverError, MATRIX_HEIGHT, MatrixDriver};

/// In-memory panel that records what the engine pushes to it
pub struct MockMatrix<const W: usize> {
    /// Points written since the last update
    pub pending: [[bool; W]; MATRIX_HEIGHT],
    /// Frame visible after the last update
    pub shown: [[bool; W]; MATRIX_HEIGHT],
    pub updates: usize,
    pub clears: usize,
    pub intensity: Option<u8>,
    pub begun: bool,
    pub fail_begin: bool,
}

impl<const W: usize> MockMatrix<W> {
    pub fn new() -> Self {
        Self {
            pending: [[false; W]; MATRIX_HEIGHT],
            shown: [[false; W]; MATRIX_HEIGHT],
            updates: 0,
            clears: 0,
            intensity: None,
            begun: false,
            fail_begin: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_begin: true,
            ..Self::new()
        }
    }

    pub fn lit_count(&self) -> usize {
        self.shown
            .iter()
            .map(|row| row.iter().filter(|on| **on).count())
            .sum()
    }
}

impl<const W: usize> MatrixDriver for MockMatrix<W> {
    fn begin(&mut self) -> Result<(), DriverError> {
        if self.fail_begin {
            return Err(DriverError::NotResponding);
        }
        self.begun = true;
        Ok(())
    }

    fn clear(&mut self) {
        self.pending = [[false; W]; MATRIX_HEIGHT];
        self.clears += 1;
    }

    fn set_point(&mut self, row: usize, col: usize, on: bool) {
        if row < MATRIX_HEIGHT && col < W {
            self.pending[row][col] = on;
        }
    }

    fn update(&mut self) {
        self.shown = self.pending;
        self.updates += 1;
    }

    fn set_intensity(&mut self, level: u8) {
        self.intensity = Some(level);
    }
}

/// Loopback serial port: tests push input, read back written lines
#[derive(Default)]
pub struct MockPort {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl MockPort {
    pub fn send(&mut self, text: &str) {
        self.rx.extend(text.bytes());
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }

    /// Everything written so far, split into lines
    pub fn take_lines(&mut self) -> Vec<String> {
        let text = String::from_utf8(std::mem::take(&mut self.tx)).expect("responses are ASCII");
        text.lines().map(str::to_owned).collect()
    }
}

impl embedded_io::ErrorType for MockPort {
    type Error = Infallible;
}

impl embedded_io::Read for MockPort {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let count = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }
}

impl embedded_io::ReadReady for MockPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl embedded_io::Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
