//! Per-player quilts: placement validation, occupancy, and scoring support.

pub mod board;

pub use board::{Quilt, EMPTY_SPACE_PENALTY, SPECIAL_TILE_BONUS};
