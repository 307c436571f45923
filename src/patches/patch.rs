//! Patches: priced, shaped game pieces with a placement cursor.
//!
//! A `Patch` is static data (shape, price, moves, button income) plus a
//! cursor used while its owner steers it onto a quilt: the current rotation
//! variant and the absolute position of the shape's local origin.
//!
//! The bonus "leather" patch is an ordinary `Patch` built with
//! [`Patch::bonus`].

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::Command;
use crate::geometry::{Coord, Rotations, Shape, MAX_CELL_OFFSET};

/// Largest distance of a patch origin from the quilt origin on either axis.
///
/// Together with [`MAX_CELL_OFFSET`] this keeps absolute cell coordinates
/// inside `i32`.
pub const MAX_ORIGIN_OFFSET: i32 = MAX_CELL_OFFSET;

/// Identifier of a patch in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatchId(pub u32);

impl PatchId {
    /// Create a new patch ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Patch({})", self.0)
    }
}

/// A game piece.
///
/// ## Example
///
/// ```
/// use rust_patchwork::geometry::{Coord, Shape};
/// use rust_patchwork::patches::{Patch, PatchId};
///
/// let shape = Shape::from_pairs(&[(0, 0), (1, 0), (0, 1)]).unwrap();
/// let mut patch = Patch::new(PatchId::new(1), shape, 3, 2, 1);
///
/// assert_eq!(patch.variants().len(), 4);
///
/// patch.absolute_move_to(Coord::new(2, 2));
/// assert!(patch.absolute_coordinates().all(|c| c.x >= 2 && c.y >= 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatchRecord", into = "PatchRecord")]
pub struct Patch {
    id: PatchId,
    price: u32,
    moves: u32,
    buttons: u32,

    /// Shape the variants are derived from (mirrored after a flip).
    base: Shape,
    variants: Rotations,
    rotation: usize,
    origin: Coord,
    flipped: bool,
}

impl Patch {
    /// Create a patch with its cursor at the quilt origin.
    #[must_use]
    pub fn new(id: PatchId, shape: Shape, price: u32, moves: u32, buttons: u32) -> Self {
        let variants = shape.all_rotations();
        Self {
            id,
            price,
            moves,
            buttons,
            base: shape,
            variants,
            rotation: 0,
            origin: Coord::ORIGIN,
            flipped: false,
        }
    }

    /// The free single-cell patch granted by track events.
    #[must_use]
    pub fn bonus(id: PatchId) -> Self {
        Self::new(id, Shape::unit(), 0, 0, 0)
    }

    /// Patch ID.
    #[must_use]
    pub fn id(&self) -> PatchId {
        self.id
    }

    /// Price in buttons.
    #[must_use]
    pub fn price(&self) -> u32 {
        self.price
    }

    /// Track spaces the buyer moves after placing it.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Button income printed on the patch.
    #[must_use]
    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    /// Number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.base.len()
    }

    /// The current rotation variant.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.variants[self.rotation]
    }

    /// All distinct rotation variants.
    #[must_use]
    pub fn variants(&self) -> &[Shape] {
        &self.variants
    }

    /// Index of the current variant.
    #[must_use]
    pub fn rotation_index(&self) -> usize {
        self.rotation
    }

    /// Absolute position of the shape's local origin.
    #[must_use]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Whether the patch is currently mirrored.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    // === Cursor ===

    /// Select the previous rotation variant, wrapping.
    pub fn rotate_left(&mut self) {
        let count = self.variants.len();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Select the next rotation variant, wrapping.
    pub fn rotate_right(&mut self) {
        self.rotation = (self.rotation + 1) % self.variants.len();
    }

    /// Mirror the patch across the vertical axis.
    ///
    /// Variants are recomputed from the mirrored shape; the rotation index
    /// is kept modulo the new variant count.
    pub fn flip(&mut self) {
        self.base = self.base.mirrored();
        self.variants = self.base.all_rotations();
        self.rotation %= self.variants.len();
        self.flipped = !self.flipped;
    }

    /// Move the origin directly.
    ///
    /// Each axis is clamped to `±MAX_ORIGIN_OFFSET`.
    pub fn absolute_move_to(&mut self, origin: Coord) {
        self.origin = Coord::new(
            origin.x.clamp(-MAX_ORIGIN_OFFSET, MAX_ORIGIN_OFFSET),
            origin.y.clamp(-MAX_ORIGIN_OFFSET, MAX_ORIGIN_OFFSET),
        );
    }

    /// Return the cursor to the first variant at the quilt origin, unflipped.
    pub fn reset_cursor(&mut self) {
        if self.flipped {
            self.flip();
        }
        self.rotation = 0;
        self.origin = Coord::ORIGIN;
    }

    /// Can the patch move up without crossing `bound` (usually 0)?
    #[must_use]
    pub fn can_move_up(&self, bound: i32) -> bool {
        let (lo, _) = self.shape().extent();
        lo.y + self.origin.y > bound
    }

    /// Can the patch move down while staying below `bound`?
    #[must_use]
    pub fn can_move_down(&self, bound: i32) -> bool {
        let (_, hi) = self.shape().extent();
        hi.y + self.origin.y + 1 < bound
    }

    /// Can the patch move left without crossing `bound` (usually 0)?
    #[must_use]
    pub fn can_move_left(&self, bound: i32) -> bool {
        let (lo, _) = self.shape().extent();
        lo.x + self.origin.x > bound
    }

    /// Can the patch move right while staying below `bound`?
    #[must_use]
    pub fn can_move_right(&self, bound: i32) -> bool {
        let (_, hi) = self.shape().extent();
        hi.x + self.origin.x + 1 < bound
    }

    /// Move one row up.
    pub fn move_up(&mut self) {
        self.absolute_move_to(self.origin + Coord::new(0, -1));
    }

    /// Move one row down.
    pub fn move_down(&mut self) {
        self.absolute_move_to(self.origin + Coord::new(0, 1));
    }

    /// Move one column left.
    pub fn move_left(&mut self) {
        self.absolute_move_to(self.origin + Coord::new(-1, 0));
    }

    /// Move one column right.
    pub fn move_right(&mut self) {
        self.absolute_move_to(self.origin + Coord::new(1, 0));
    }

    /// Apply a manipulation command inside a `width x height` area.
    ///
    /// Moves are guarded by the `can_move_*` checks. Rotations and flips
    /// always apply. `Place` and `Cancel` are not cursor commands and are
    /// ignored. Returns whether the cursor changed.
    pub fn apply(&mut self, command: Command, width: i32, height: i32) -> bool {
        match command {
            Command::Up if self.can_move_up(0) => self.move_up(),
            Command::Down if self.can_move_down(height) => self.move_down(),
            Command::Left if self.can_move_left(0) => self.move_left(),
            Command::Right if self.can_move_right(width) => self.move_right(),
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::Flip => self.flip(),
            _ => return false,
        }
        true
    }

    // === Geometry ===

    /// Cells of the current variant translated to the origin.
    pub fn absolute_coordinates(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shape().translated(self.origin)
    }

    /// Check if every absolute cell lies in `[0, width) x [0, height)`.
    pub fn fits(&self, width: i32, height: i32) -> Result<bool> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(self.absolute_coordinates().all(|c| c.within(width, height)))
    }

    /// Check if two patches share any absolute cell.
    #[must_use]
    pub fn overlaps(&self, other: &Patch) -> bool {
        let (lo, hi) = self.shape().extent();
        let (other_lo, other_hi) = other.shape().extent();
        let (lo, hi) = (lo + self.origin, hi + self.origin);
        let (other_lo, other_hi) = (other_lo + other.origin, other_hi + other.origin);
        if hi.x < other_lo.x || other_hi.x < lo.x || hi.y < other_lo.y || other_hi.y < lo.y {
            return false;
        }
        self.absolute_coordinates()
            .any(|c| other.shape().contains(c - other.origin))
    }
}

/// Serialized form of a [`Patch`]. Variants are rebuilt from `base` on
/// load, so the cursor can be checked against them.
#[derive(Serialize, Deserialize)]
struct PatchRecord {
    id: PatchId,
    price: u32,
    moves: u32,
    buttons: u32,
    base: Shape,
    rotation: usize,
    origin: Coord,
    flipped: bool,
}

impl TryFrom<PatchRecord> for Patch {
    type Error = GameError;

    fn try_from(record: PatchRecord) -> Result<Self> {
        let mut patch =
            Patch::new(record.id, record.base, record.price, record.moves, record.buttons);
        if record.rotation >= patch.variants.len() {
            return Err(GameError::InvalidConfig(format!(
                "{} has {} rotations, cursor at {}",
                record.id,
                patch.variants.len(),
                record.rotation
            )));
        }
        if record.origin.x.unsigned_abs() > MAX_ORIGIN_OFFSET.unsigned_abs()
            || record.origin.y.unsigned_abs() > MAX_ORIGIN_OFFSET.unsigned_abs()
        {
            return Err(GameError::InvalidConfig(format!(
                "{} origin ({}, {}) is out of range",
                record.id, record.origin.x, record.origin.y
            )));
        }
        patch.rotation = record.rotation;
        patch.origin = record.origin;
        patch.flipped = record.flipped;
        Ok(patch)
    }
}

impl From<Patch> for PatchRecord {
    fn from(patch: Patch) -> Self {
        Self {
            id: patch.id,
            price: patch.price,
            moves: patch.moves,
            buttons: patch.buttons,
            base: patch.base,
            rotation: patch.rotation,
            origin: patch.origin,
            flipped: patch.flipped,
        }
    }
}
