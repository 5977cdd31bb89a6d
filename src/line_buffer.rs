//! Bounded line assembly for the serial input
//!
//! Bytes accumulate until `\n` or `\r`. When a line grows past capacity the
//! oldest half is dropped, so garbage without terminators cannot grow the
//! buffer and a command typed after it still gets through.

use heapless::{String, Vec};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Default capacity used by the controller
pub const LINE_CAPACITY: usize = 64;

/// Byte substituted for anything outside 7-bit ASCII
const REPLACEMENT: u8 = b'?';

#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Feed one byte; returns the finished line on a terminator
    ///
    /// Terminators on an empty buffer (blank lines, `\r\n` pairs) yield nothing.
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        if byte == b'\n' || byte == b'\r' {
            if self.bytes.is_empty() {
                return None;
            }
            return Some(self.take_line());
        }

        let byte = if byte.is_ascii() { byte } else { REPLACEMENT };
        if self.bytes.is_full() {
            self.evict_oldest_half();
        }
        // Cannot fail, the buffer was just made room in
        let _ = self.bytes.push(byte);
        None
    }

    fn evict_oldest_half(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[serial] line overflow, dropping {} bytes", N / 2);

        let keep_from = N / 2;
        self.bytes.copy_within(keep_from.., 0);
        self.bytes.truncate(N - keep_from);
    }

    fn take_line(&mut self) -> String<N> {
        let mut line = String::new();
        for &byte in &self.bytes {
            // Only ASCII is ever stored and the capacities match
            let _ = line.push(char::from(byte));
        }
        self.bytes.clear();
        line
    }
}
