//! Action vocabulary shared by the engine and its agents.
//!
//! Two decision points exist in a turn:
//! - choosing what to do with the patch offer (`PatchChoice`)
//! - steering a chosen patch onto the quilt (`Command`), one command at a time
//!
//! Every completed decision is recorded as a `TurnRecord` in the game history.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::patches::PatchId;

/// A manipulation command for a patch being placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move one row up.
    Up,
    /// Move one row down.
    Down,
    /// Move one column left.
    Left,
    /// Move one column right.
    Right,
    /// Previous rotation variant.
    RotateLeft,
    /// Next rotation variant.
    RotateRight,
    /// Mirror the patch.
    Flip,
    /// Try to place the patch at its current position.
    Place,
    /// Give up on this patch and return to the choice.
    Cancel,
}

impl Command {
    /// All commands, in menu order.
    pub const ALL: [Command; 9] = [
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::RotateLeft,
        Command::RotateRight,
        Command::Flip,
        Command::Place,
        Command::Cancel,
    ];

    /// Check if this command only changes the patch cursor.
    #[must_use]
    pub fn is_manipulation(self) -> bool {
        !matches!(self, Command::Place | Command::Cancel)
    }
}

/// What a player decides to do with the patch offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatchChoice {
    /// Buy the patch at this window index.
    Buy(usize),
    /// Move ahead of the next player and collect buttons instead.
    Advance,
}

/// What a player did as the main action of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainAction {
    /// Bought and placed a patch.
    Bought {
        patch: PatchId,
        price: u32,
    },
    /// Advanced on the track.
    Advanced {
        spaces: u32,
    },
}

/// A completed turn, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The player who took the turn.
    pub player: PlayerId,

    /// The main action.
    pub action: MainAction,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Track position after the turn.
    pub position: usize,
}

impl TurnRecord {
    /// Create a new turn record.
    #[must_use]
    pub fn new(player: PlayerId, action: MainAction, turn: u32, position: usize) -> Self {
        Self {
            player,
            action,
            turn,
            position,
        }
    }
}
