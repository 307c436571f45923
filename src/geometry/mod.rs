//! Shape and coordinate algebra.
//!
//! - `Coord`: integer cell position with quarter-turn rotations
//! - `Shape`: a polyomino anchored at its local origin, with rotation
//!   canonicalization

pub mod coord;
pub mod shape;

pub use coord::Coord;
pub use shape::{Rotations, Shape, MAX_CELL_OFFSET};
