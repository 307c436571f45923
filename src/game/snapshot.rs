//! Read-only snapshots for renderers.
//!
//! A [`GameSnapshot`] is a plain serde value holding everything a display
//! needs. Nothing in it refers back to the live game, so it can be sent to
//! another thread or encoded with bincode for a remote client.

use serde::{Deserialize, Serialize};

use crate::automa::Difficulty;
use crate::core::{GameError, PlayerId, Result, TurnPhase};
use crate::geometry::Coord;
use crate::patches::{Patch, PatchId};
use crate::rules::Standing;

use super::Game;

/// A patch as listed in the window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchView {
    pub id: PatchId,
    pub price: u32,
    pub moves: u32,
    pub buttons: u32,
    pub cells: Vec<Coord>,
}

impl From<&Patch> for PatchView {
    fn from(patch: &Patch) -> Self {
        Self {
            id: patch.id(),
            price: patch.price(),
            moves: patch.moves(),
            buttons: patch.buttons(),
            cells: patch.shape().cells().to_vec(),
        }
    }
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub name: String,
    /// `Some` for Automa seats.
    pub automa: Option<Difficulty>,
    pub buttons: u32,
    pub button_income: u32,
    pub has_special_tile: bool,
    pub position: usize,
    /// Occupancy as `grid[y][x]`, for human seats.
    pub quilt: Option<Vec<Vec<bool>>>,
    pub patch_count: usize,
    pub score: i64,
}

/// Everything a renderer shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub current: PlayerId,
    pub phase: TurnPhase,
    pub finished: bool,
    pub bank: u32,
    /// Seats in track queue order, furthest behind first.
    pub track_order: Vec<PlayerId>,
    pub window: Vec<PatchView>,
    pub seats: Vec<SeatView>,
    /// Bonus patches waiting to be placed.
    pub pending: Vec<String>,
    /// Active events ahead of the acting player.
    pub upcoming_events: Vec<String>,
    /// Provisional until `finished`.
    pub standings: Vec<Standing>,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Encode(e.to_string()))
    }

    /// Decode a bincode-encoded snapshot.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Encode(e.to_string()))
    }
}

impl Game {
    /// Capture the current state for display.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let track = self.track();
        let current = self.current_player();

        let seats = self
            .players()
            .map(|(player, seat)| SeatView {
                player,
                name: seat.name.clone(),
                automa: seat.automa_state().map(|a| a.difficulty()),
                buttons: seat.buttons,
                button_income: seat.button_income(),
                has_special_tile: seat.has_special_tile,
                position: track.position(player).unwrap_or_default(),
                quilt: seat.quilt().map(|q| q.occupancy_grid()),
                patch_count: seat
                    .quilt()
                    .map(|q| q.patches().len())
                    .or_else(|| seat.automa_state().map(|a| a.patches().len()))
                    .unwrap_or_default(),
                score: seat.score(),
            })
            .collect();

        let position = track.position(current).unwrap_or_default();

        GameSnapshot {
            turn: self.turn_number(),
            current,
            phase: self.phase(),
            finished: self.is_finished(),
            bank: self.bank().balance(),
            track_order: track.entries().iter().map(|e| e.player).collect(),
            window: self.window().into_iter().map(PatchView::from).collect(),
            seats,
            pending: self
                .pending()
                .iter()
                .map(|p| format!("place bonus patch {}", p.id()))
                .collect(),
            upcoming_events: track.events().upcoming(position).map(|e| e.describe()).collect(),
            standings: self.ranking().standings,
        }
    }
}
