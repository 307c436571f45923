//! Integer grid coordinates.
//!
//! `x` is the column (compared against a width), `y` is the row (compared
//! against a height). Rotations are quarter turns about the origin and
//! form a 4-cycle.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A cell position on a quilt, or a cell offset inside a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// The local origin of every shape.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quarter turn clockwise: (x, y) -> (-y, x).
    #[must_use]
    pub const fn rotate_clockwise(self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    /// Quarter turn anticlockwise: (x, y) -> (y, -x).
    #[must_use]
    pub const fn rotate_anticlockwise(self) -> Self {
        Self { x: self.y, y: -self.x }
    }

    /// Mirror across the vertical axis: (x, y) -> (-x, y).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self { x: -self.x, y: self.y }
    }

    /// Check containment in the half-open rectangle `[0, width) x [0, height)`.
    #[must_use]
    pub const fn within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
