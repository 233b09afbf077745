use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A tile coordinate. May lie outside the grid; the grid answers such
/// queries as walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn from_index(x: usize, y: usize) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    pub(crate) fn manhattan(self, to: Position) -> i32 {
        (to - self).magnitude_l1()
    }

    pub(crate) fn in_bounds(self, bounds: (usize, usize)) -> bool {
        let (width, height) = bounds;
        let x_in_bounds = self.x >= 0 && (self.x as usize) < width;
        let y_in_bounds = self.y >= 0 && (self.y as usize) < height;
        x_in_bounds && y_in_bounds
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PositionDelta {
    pub(crate) dx: i32,
    pub(crate) dy: i32,
}

impl PositionDelta {
    pub(crate) fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub(crate) fn scaled(self, factor: i32) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }

    pub(crate) fn magnitude_l1(self) -> i32 {
        self.dx.abs() + self.dy.abs()
    }
}

impl Add<PositionDelta> for Position {
    type Output = Position;

    fn add(self, delta: PositionDelta) -> Position {
        let x = self.x + delta.dx;
        let y = self.y + delta.dy;
        Position { x, y }
    }
}

impl Sub for Position {
    type Output = PositionDelta;

    fn sub(self, other: Position) -> PositionDelta {
        PositionDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}
