//! Agent trait for seats driven from outside the engine.

use crate::core::{Command, PatchChoice};
use crate::game::Game;
use crate::patches::Patch;

/// Decision source for a human seat.
///
/// The engine never blocks on input. An agent that has no answer yet
/// returns `None`, and [`crate::game::drive_turn`] reports the turn as
/// stalled without changing anything the agent has not confirmed.
///
/// ## Implementation Notes
///
/// - `choose_patch` is asked once per main action
/// - `choose_command` is asked repeatedly while a patch is being
///   positioned, either a purchase or a bonus patch; `Place` commits and
///   `Cancel` abandons
pub trait PlayerAgent {
    /// Pick a window patch or advance.
    fn choose_patch(&mut self, game: &Game) -> Option<PatchChoice>;

    /// Next cursor command for `patch`.
    fn choose_command(&mut self, patch: &Patch, game: &Game) -> Option<Command>;
}
