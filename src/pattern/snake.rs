//! "Bored" snake
//!
//! A fixed-length snake roams the panel chasing a single food cell. It never
//! grows; eating only respawns the food somewhere else.

use super::{Pattern, Step};
use crate::bounds::{Direction, Point};
use crate::rng::Rng;
use crate::surface::{MATRIX_HEIGHT, MatrixSurface};
use crate::timing::{Pacing, PatternTimings};

pub const SNAKE_LENGTH: usize = 5;

const START_ROW: i16 = 4;

#[derive(Debug, Clone)]
pub struct SnakePattern {
    /// Head first
    body: [Point; SNAKE_LENGTH],
    food: Point,
    direction: Direction,
}

impl SnakePattern {
    /// Straight snake on the middle row heading right, plus fresh food
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new<const W: usize>(rng: &mut Rng) -> Self {
        let start_x = (W / 2) as i16;
        let body = core::array::from_fn(|i| Point::new(start_x - i as i16, START_ROW));
        let mut snake = Self {
            body,
            food: Point::default(),
            direction: Direction::RIGHT,
        };
        snake.spawn_food::<W>(rng);
        snake
    }

    pub const fn body(&self) -> &[Point; SNAKE_LENGTH] {
        &self.body
    }

    pub const fn head(&self) -> Point {
        self.body[0]
    }

    pub const fn food(&self) -> Point {
        self.food
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    fn covers(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Place food on a random cell not covered by the body
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn spawn_food<const W: usize>(&mut self, rng: &mut Rng) {
        loop {
            let candidate = Point::new(
                rng.range(W as u32) as i16,
                rng.range(MATRIX_HEIGHT as u32) as i16,
            );
            if !self.covers(candidate) {
                self.food = candidate;
                return;
            }
        }
    }

    /// Greedy move toward the food along one axis at a time
    ///
    /// An axis is dropped when its move would reverse the snake or run the
    /// head into its own body. When both axes remain one is picked at random;
    /// when none remain the snake escapes sideways.
    #[allow(clippy::cast_possible_truncation)]
    fn steer<const W: usize>(&mut self, rng: &mut Rng) {
        let head = self.head();
        let toward_x = Direction {
            dx: (self.food.x - head.x).signum() as i8,
            dy: 0,
        };
        let toward_y = Direction {
            dx: 0,
            dy: (self.food.y - head.y).signum() as i8,
        };
        let open_x = toward_x.dx != 0 && self.is_open::<W>(toward_x);
        let open_y = toward_y.dy != 0 && self.is_open::<W>(toward_y);

        self.direction = match (open_x, open_y) {
            (true, true) => {
                if rng.coin_flip() {
                    toward_x
                } else {
                    toward_y
                }
            }
            (true, false) => toward_x,
            (false, true) => toward_y,
            (false, false) => self.escape::<W>(rng),
        };
    }

    /// Keep going if possible, otherwise turn to a free perpendicular side
    fn escape<const W: usize>(&self, rng: &mut Rng) -> Direction {
        if self.is_open::<W>(self.direction) {
            return self.direction;
        }
        let side = Direction {
            dx: self.direction.dy,
            dy: -self.direction.dx,
        };
        let (first, second) = if rng.coin_flip() {
            (side, side.reversed())
        } else {
            (side.reversed(), side)
        };
        if self.is_open::<W>(first) {
            first
        } else if self.is_open::<W>(second) {
            second
        } else {
            self.direction
        }
    }

    /// Whether moving in `direction` neither reverses nor hits the body
    ///
    /// The tail cell counts as free, it moves away on the same step.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn is_open<const W: usize>(&self, direction: Direction) -> bool {
        if direction.is_reverse_of(self.direction) {
            return false;
        }
        let next = self
            .head()
            .step_wrapped(direction, W as i16, MATRIX_HEIGHT as i16);
        !self.body[..SNAKE_LENGTH - 1].contains(&next)
    }
}

impl Pattern for SnakePattern {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn step<const W: usize>(&mut self, surface: &mut MatrixSurface<W>, rng: &mut Rng) -> Step {
        self.steer::<W>(rng);

        let next_head = self
            .head()
            .step_wrapped(self.direction, W as i16, MATRIX_HEIGHT as i16);
        let ate = next_head == self.food;

        self.body.copy_within(0..SNAKE_LENGTH - 1, 1);
        self.body[0] = next_head;

        if ate {
            self.spawn_food::<W>(rng);
        }

        surface.clear();
        surface.plot(self.food);
        for segment in &self.body {
            surface.plot(*segment);
        }
        Step::Continue
    }

    fn pacing(&self, timings: &PatternTimings) -> Pacing {
        timings.snake
    }
}
