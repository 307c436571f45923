//! Polyomino shapes and rotation canonicalization.
//!
//! A `Shape` is a set of unique cells that always contains the local
//! origin `(0, 0)`. Cells are kept sorted so two shapes with the same cells
//! compare equal regardless of construction order.
//!
//! ## Rotation variants
//!
//! Rotating about the origin moves cells around, so a rotated square is
//! never literally the same set as the original. Variants are therefore
//! compared by *form*: both shapes shifted so that their bounding box starts
//! at `(0, 0)`. Under that comparison a square has one variant, a domino or
//! an S-tetromino has two, and an L-tromino has four.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::Coord;
use crate::core::error::{GameError, Result};

/// Up to four distinct orientations of a shape.
pub type Rotations = SmallVec<[Shape; 4]>;

/// Largest distance of a cell from the origin on either axis.
pub const MAX_CELL_OFFSET: i32 = i16::MAX as i32;

/// A non-empty set of cells including the origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct Shape {
    cells: Vec<Coord>,
}

impl Shape {
    /// Create a shape from cells.
    ///
    /// Duplicate cells are collapsed. Fails if no cells are given, if a
    /// cell lies more than [`MAX_CELL_OFFSET`] from the origin on either
    /// axis, or if the origin is missing.
    pub fn new(cells: impl IntoIterator<Item = Coord>) -> Result<Self> {
        let mut cells: Vec<Coord> = cells.into_iter().collect();
        let limit = MAX_CELL_OFFSET.unsigned_abs();
        if cells.is_empty()
            || cells.iter().any(|c| c.x.unsigned_abs() > limit || c.y.unsigned_abs() > limit)
        {
            return Err(GameError::InvalidShape);
        }
        cells.sort_unstable();
        cells.dedup();
        if cells.binary_search(&Coord::ORIGIN).is_err() {
            return Err(GameError::MissingOrigin);
        }
        Ok(Self { cells })
    }

    /// Create a shape from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(i32, i32)]) -> Result<Self> {
        Self::new(pairs.iter().copied().map(Coord::from))
    }

    /// A single cell at the origin.
    #[must_use]
    pub fn unit() -> Self {
        Self { cells: vec![Coord::ORIGIN] }
    }

    /// An axis-aligned `width x height` rectangle anchored at the origin.
    pub fn rectangle(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        if width > MAX_CELL_OFFSET || height > MAX_CELL_OFFSET {
            return Err(GameError::InvalidShape);
        }
        Self::new((0..height).flat_map(|y| (0..width).map(move |x| Coord::new(x, y))))
    }

    /// The cells, sorted.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a cell belongs to the shape.
    #[must_use]
    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Bounding box as `(min, max)`, both inclusive.
    #[must_use]
    pub fn extent(&self) -> (Coord, Coord) {
        let first = self.cells[0];
        self.cells.iter().skip(1).fold((first, first), |(lo, hi), c| {
            (
                Coord::new(lo.x.min(c.x), lo.y.min(c.y)),
                Coord::new(hi.x.max(c.x), hi.y.max(c.y)),
            )
        })
    }

    /// True if the cells form a full `n x n` block.
    ///
    /// A square looks the same after any rotation, so it has exactly one
    /// variant.
    #[must_use]
    pub fn is_square(&self) -> bool {
        let count = self.cells.len();
        let side = (count as f64).sqrt().round() as usize;
        if side * side != count {
            return false;
        }
        let (lo, hi) = self.extent();
        (hi.x - lo.x + 1) as usize == side && (hi.y - lo.y + 1) as usize == side
    }

    /// The shape rotated a quarter turn clockwise about the origin.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        self.map(Coord::rotate_clockwise)
    }

    /// The shape rotated a quarter turn anticlockwise about the origin.
    #[must_use]
    pub fn rotated_anticlockwise(&self) -> Self {
        self.map(Coord::rotate_anticlockwise)
    }

    /// The shape mirrored across the vertical axis through the origin.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        self.map(Coord::mirrored)
    }

    /// Cells shifted so the bounding box starts at `(0, 0)`, sorted.
    #[must_use]
    pub fn normalized(&self) -> Vec<Coord> {
        let (lo, _) = self.extent();
        let mut cells: Vec<Coord> = self.cells.iter().map(|&c| c - lo).collect();
        cells.sort_unstable();
        cells
    }

    /// Equality up to translation.
    #[must_use]
    pub fn same_form(&self, other: &Shape) -> bool {
        self.len() == other.len() && self.normalized() == other.normalized()
    }

    /// Distinct orientations of this shape, identity first.
    ///
    /// Squares yield only the identity. Otherwise the shape is rotated
    /// clockwise up to three times and each result is kept only if no
    /// earlier variant has the same form.
    #[must_use]
    pub fn all_rotations(&self) -> Rotations {
        let mut variants = Rotations::new();
        variants.push(self.clone());
        if self.is_square() {
            return variants;
        }

        let mut current = self.clone();
        for _ in 0..3 {
            current = current.rotated_clockwise();
            if !variants.iter().any(|v| v.same_form(&current)) {
                variants.push(current.clone());
            }
        }
        variants
    }

    /// Cells translated by `offset`.
    pub fn translated(&self, offset: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(move |&c| c + offset)
    }

    fn map(&self, f: impl Fn(Coord) -> Coord) -> Self {
        let mut cells: Vec<Coord> = self.cells.iter().map(|&c| f(c)).collect();
        cells.sort_unstable();
        Self { cells }
    }
}

impl TryFrom<Vec<Coord>> for Shape {
    type Error = GameError;

    fn try_from(cells: Vec<Coord>) -> Result<Self> {
        Self::new(cells)
    }
}

impl From<Shape> for Vec<Coord> {
    fn from(shape: Shape) -> Self {
        shape.cells
    }
}
