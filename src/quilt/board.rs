//! A player's quilt: the grid patches are sewn onto.
//!
//! ## Placement area
//!
//! A patch is accepted only if it fits inside `(width - 1) x (height - 1)`,
//! one row and one column smaller than the nominal grid, and does not
//! overlap anything already placed. Scoring still counts empty spaces over
//! the full `width x height` grid.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::core::error::{GameError, Result};
use crate::geometry::{Coord, MAX_CELL_OFFSET};
use crate::patches::Patch;

/// Score bonus for holding the special tile.
pub const SPECIAL_TILE_BONUS: i64 = 7;

/// Score penalty per empty quilt space.
pub const EMPTY_SPACE_PENALTY: i64 = 2;

/// A fixed-size grid of placed patches.
///
/// Quilts are serialized for inspection only; snapshots carry an
/// occupancy grid instead.
#[derive(Clone, Debug, Serialize)]
pub struct Quilt {
    width: i32,
    height: i32,

    /// Placed patches in placement order.
    patches: Vec<Patch>,

    /// Every occupied cell.
    occupied: FxHashSet<Coord>,
}

impl Quilt {
    /// Create an empty quilt.
    ///
    /// Each side must lie in `1..=MAX_CELL_OFFSET`.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 || width > MAX_CELL_OFFSET || height > MAX_CELL_OFFSET {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            patches: Vec::new(),
            occupied: FxHashSet::default(),
        })
    }

    /// Grid width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Placed patches, oldest first.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Check whether `patch` can be placed at its current cursor.
    #[must_use]
    pub fn can_add(&self, patch: &Patch) -> bool {
        matches!(patch.fits(self.width - 1, self.height - 1), Ok(true))
            && !patch.absolute_coordinates().any(|c| self.occupied.contains(&c))
    }

    /// Place a patch. Returns false, leaving the quilt unchanged, if it does
    /// not fit or overlaps.
    pub fn add(&mut self, patch: Patch) -> bool {
        if !self.can_add(&patch) {
            return false;
        }
        self.occupied.extend(patch.absolute_coordinates());
        self.patches.push(patch);
        true
    }

    /// Find any legal placement of `patch`, trying every orientation and
    /// origin. Returns the patch with its cursor set to that placement.
    #[must_use]
    pub fn find_placement(&self, patch: &Patch) -> Option<Patch> {
        let mut candidate = patch.clone();
        candidate.reset_cursor();

        for _ in 0..2 {
            for _ in 0..candidate.variants().len() {
                for y in -self.height..self.height {
                    for x in -self.width..self.width {
                        candidate.absolute_move_to(Coord::new(x, y));
                        if self.can_add(&candidate) {
                            return Some(candidate);
                        }
                    }
                }
                candidate.rotate_right();
            }
            candidate.flip();
        }
        None
    }

    /// Check if a cell is covered.
    #[must_use]
    pub fn occupied(&self, cell: Coord) -> bool {
        self.occupied.contains(&cell)
    }

    /// Check for a fully covered `side x side` block.
    ///
    /// Blocks are anchored at occupied cells and extend towards +x and +y.
    #[must_use]
    pub fn has_filled_square(&self, side: i32) -> bool {
        if side <= 0 {
            return false;
        }
        self.occupied.iter().any(|&anchor| {
            (0..side).all(|dy| (0..side).all(|dx| self.occupied(anchor + Coord::new(dx, dy))))
        })
    }

    /// Number of uncovered cells on the full grid.
    #[must_use]
    pub fn count_empty_spaces(&self) -> usize {
        (self.width * self.height) as usize - self.occupied.len()
    }

    /// Total button income printed on placed patches.
    #[must_use]
    pub fn button_income(&self) -> u32 {
        self.patches.iter().map(Patch::buttons).sum()
    }

    /// Final score for a player holding `buttons` with this quilt.
    #[must_use]
    pub fn score(&self, buttons: u32, has_special_tile: bool) -> i64 {
        let bonus = if has_special_tile { SPECIAL_TILE_BONUS } else { 0 };
        i64::from(buttons) + bonus - EMPTY_SPACE_PENALTY * self.count_empty_spaces() as i64
    }

    /// Occupancy as rows of cells, `grid[y][x]`.
    #[must_use]
    pub fn occupancy_grid(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.occupied(Coord::new(x, y))).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::patches::PatchId;

    fn placed(id: u32, shape: Shape, at: (i32, i32), buttons: u32) -> Patch {
        let mut patch = Patch::new(PatchId::new(id), shape, 1, 1, buttons);
        patch.absolute_move_to(at.into());
        patch
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(Quilt::new(0, 9), Err(GameError::InvalidDimensions { .. })));
        assert!(matches!(Quilt::new(9, -1), Err(GameError::InvalidDimensions { .. })));
        assert!(matches!(
            Quilt::new(i32::MAX, 9),
            Err(GameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_far_origin_is_rejected() {
        let quilt = Quilt::new(9, 9).unwrap();
        let domino = Shape::from_pairs(&[(-1, 0), (0, 0)]).unwrap();

        for at in [(i32::MIN, 0), (0, i32::MIN), (i32::MAX, i32::MAX)] {
            let patch = placed(1, domino.clone(), at, 0);
            assert!(!quilt.can_add(&patch), "origin {at:?}");
        }
    }

    #[test]
    fn test_l_patch_rejected_on_3x3() {
        let quilt = Quilt::new(3, 3).unwrap();
        let l = Shape::from_pairs(&[(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap();
        let patch = placed(1, l, (0, 0), 0);

        assert!(!quilt.can_add(&patch));
    }

    #[test]
    fn test_edge_is_outside_placement_area() {
        let quilt = Quilt::new(4, 4).unwrap();

        // Touches column 2 only: inside the 3x3 placement area
        let inside = placed(1, Shape::rectangle(3, 1).unwrap(), (0, 0), 0);
        assert!(quilt.can_add(&inside));

        // Touches column 3 = width - 1: rejected
        let on_edge = placed(2, Shape::rectangle(1, 1).unwrap(), (3, 0), 0);
        assert!(!quilt.can_add(&on_edge));

        let on_bottom = placed(3, Shape::unit(), (0, 3), 0);
        assert!(!quilt.can_add(&on_bottom));
    }

    #[test]
    fn test_add_in_order_and_reject_overlap() {
        let mut quilt = Quilt::new(9, 9).unwrap();

        assert!(quilt.add(placed(1, Shape::rectangle(2, 2).unwrap(), (0, 0), 1)));
        assert!(quilt.add(placed(2, Shape::rectangle(3, 1).unwrap(), (2, 0), 2)));
        assert_eq!(quilt.patches().len(), 2);
        assert_eq!(quilt.patches()[0].id(), PatchId::new(1));
        assert_eq!(quilt.patches()[1].id(), PatchId::new(2));

        assert!(!quilt.add(placed(3, Shape::rectangle(2, 1).unwrap(), (1, 1), 0)));
        assert_eq!(quilt.patches().len(), 2);
        assert!(!quilt.occupied(Coord::new(2, 1)));
    }

    #[test]
    fn test_find_placement() {
        let mut quilt = Quilt::new(3, 3).unwrap();
        // Fill the top row of the 2x2 placement area
        quilt.add(placed(1, Shape::rectangle(2, 1).unwrap(), (0, 0), 0));

        let vertical = Patch::new(PatchId::new(2), Shape::rectangle(1, 2).unwrap(), 1, 1, 0);
        let spot = quilt.find_placement(&vertical).unwrap();
        assert!(quilt.can_add(&spot));
        assert_eq!(spot.absolute_coordinates().collect::<Vec<_>>(), vec![Coord::new(0, 1), Coord::new(1, 1)]);

        assert!(quilt.add(spot));
        assert!(quilt.find_placement(&Patch::bonus(PatchId::new(3))).is_none());
    }

    #[test]
    fn test_occupied() {
        let mut quilt = Quilt::new(5, 5).unwrap();
        quilt.add(placed(1, Shape::rectangle(2, 1).unwrap(), (1, 2), 0));

        assert!(quilt.occupied(Coord::new(1, 2)));
        assert!(quilt.occupied(Coord::new(2, 2)));
        assert!(!quilt.occupied(Coord::new(3, 2)));
    }

    #[test]
    fn test_filled_square() {
        let mut quilt = Quilt::new(9, 9).unwrap();
        // 7 rows of width 7, leaving out one cell of the last row
        for row in 0..6 {
            assert!(quilt.add(placed(row as u32, Shape::rectangle(7, 1).unwrap(), (0, row), 0)));
        }
        assert!(quilt.add(placed(6, Shape::rectangle(6, 1).unwrap(), (0, 6), 0)));
        assert!(!quilt.has_filled_square(7));
        assert!(quilt.has_filled_square(6));

        assert!(quilt.add(placed(7, Shape::unit(), (6, 6), 0)));
        assert!(quilt.has_filled_square(7));
    }

    #[test]
    fn test_empty_spaces_and_income() {
        let mut quilt = Quilt::new(9, 9).unwrap();
        assert_eq!(quilt.count_empty_spaces(), 81);

        quilt.add(placed(1, Shape::rectangle(2, 2).unwrap(), (0, 0), 2));
        quilt.add(placed(2, Shape::rectangle(3, 1).unwrap(), (4, 4), 1));

        assert_eq!(quilt.count_empty_spaces(), 74);
        assert_eq!(quilt.button_income(), 3);
    }

    #[test]
    fn test_score() {
        let mut quilt = Quilt::new(3, 3).unwrap();
        quilt.add(placed(1, Shape::rectangle(2, 2).unwrap(), (0, 0), 0));

        // 5 empty spaces
        assert_eq!(quilt.score(12, false), 12 - 10);
        assert_eq!(quilt.score(12, true), 12 + 7 - 10);
    }

    #[test]
    fn test_occupancy_grid() {
        let mut quilt = Quilt::new(3, 2).unwrap();
        quilt.add(placed(1, Shape::unit(), (1, 0), 0));

        assert_eq!(
            quilt.occupancy_grid(),
            vec![vec![false, true, false], vec![false, false, false]]
        );
    }
}
