//! The Automa: a card-driven opponent that plays without input.
//!
//! - [`AutomaCard`]: per-turn budget, income multiplier, and filters
//! - [`choose_patch`]: the filter pipeline that picks a window patch
//! - [`Difficulty`]: tile threshold and cumulative scoring per tier
//! - [`Automa`]: deck, discard pile, and acquired patches

mod card;
mod difficulty;
mod player;
mod policy;

pub use card::{AutomaCard, PatchFilter};
pub use difficulty::{Difficulty, PATCH_COUNT_PAR};
pub use player::Automa;
pub use policy::choose_patch;
