//! Matrix coordinates and edge handling

/// A cell on the matrix: `x` is the column, `y` the logical row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Move by `direction`, wrapping around a `width` x `height` area
    #[must_use]
    pub const fn step_wrapped(self, direction: Direction, width: i16, height: i16) -> Self {
        Self {
            x: wrap(self.x + direction.dx as i16, width),
            y: wrap(self.y + direction.dy as i16, height),
        }
    }
}

/// Unit movement on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    pub const DOWN: Self = Self { dx: 0, dy: 1 };
    pub const UP: Self = Self { dx: 0, dy: -1 };

    /// Direction pointing the other way
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    pub const fn is_reverse_of(self, other: Self) -> bool {
        self.dx == -other.dx && self.dy == -other.dy
    }
}

/// Wrap a coordinate into `0..len`
pub const fn wrap(value: i16, len: i16) -> i16 {
    if len <= 0 {
        return 0;
    }
    value.rem_euclid(len)
}

/// Start offset that centers `content` pixels in `available` pixels
///
/// Content wider than the area starts at the left edge.
pub const fn centered_start(available: i32, content: i32) -> i32 {
    let start = (available - content) / 2;
    if start < 0 { 0 } else { start }
}
