//! Patchwork game engine.
//!
//! - [`Game`]: owns the state and runs the turn lifecycle
//! - [`GameSnapshot`]: serializable view for renderers
//! - [`drive_turn`]: reference loop that plays one turn through a
//!   [`crate::rules::PlayerAgent`]
//!
//! Supports any roster size, with any mix of human and Automa seats.

mod driver;
mod engine;
mod snapshot;

pub use driver::{drive_turn, TurnOutcome, MAX_COMMANDS};
pub use engine::{AutomaTurn, Game};
pub use snapshot::{GameSnapshot, PatchView, SeatView};
