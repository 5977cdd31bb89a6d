//! Logical framebuffer for a chain of 8x8 modules

use crate::MatrixDriver;
use crate::bounds::Point;

/// Rows on every module
pub const MATRIX_HEIGHT: usize = 8;

/// Columns contributed by one chained module
pub const MODULE_WIDTH: usize = 8;

/// How logical rows map onto the driver's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Logical row 0 is driver row 0
    #[default]
    Normal,
    /// Logical row 0 is driver row 7 (modules mounted upside down, FC16 boards)
    Flipped,
}

impl Orientation {
    const fn physical_row(self, row: usize) -> usize {
        match self {
            Self::Normal => row,
            Self::Flipped => MATRIX_HEIGHT - 1 - row,
        }
    }
}

/// Boolean pixel grid `W` columns wide and [`MATRIX_HEIGHT`] rows tall
///
/// Writes outside the grid are dropped so scrolling content can start
/// and end off-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSurface<const W: usize> {
    pixels: [[bool; W]; MATRIX_HEIGHT],
}

impl<const W: usize> Default for MatrixSurface<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize> MatrixSurface<W> {
    pub const fn new() -> Self {
        Self {
            pixels: [[false; W]; MATRIX_HEIGHT],
        }
    }

    pub const fn width(&self) -> usize {
        W
    }

    pub const fn height(&self) -> usize {
        MATRIX_HEIGHT
    }

    pub fn clear(&mut self) {
        for row in &mut self.pixels {
            row.fill(false);
        }
    }

    /// Set a pixel, ignoring coordinates outside the surface
    pub fn set(&mut self, row: i32, col: i32, on: bool) {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return;
        };
        if let Some(pixel) = self.pixels.get_mut(row).and_then(|r| r.get_mut(col)) {
            *pixel = on;
        }
    }

    /// Light the pixel under `point`
    pub fn plot(&mut self, point: Point) {
        self.set(i32::from(point.y), i32::from(point.x), true);
    }

    /// Read a pixel; anything outside the surface is off
    pub fn get(&self, row: i32, col: i32) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        self.pixels
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .map(|row| row.iter().filter(|on| **on).count())
            .sum()
    }

    /// Write every pixel to the driver and latch the frame
    pub fn flush<D: MatrixDriver>(&self, driver: &mut D, orientation: Orientation) {
        for (row, pixels) in self.pixels.iter().enumerate() {
            let physical = orientation.physical_row(row);
            for (col, on) in pixels.iter().enumerate() {
                driver.set_point(physical, col, *on);
            }
        }
        driver.update();
    }
}
