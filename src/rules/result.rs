//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One seat's place in the ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: i64,
    /// Arrival sequence on the seat's final space; lower arrived first.
    pub arrival: u64,
}

/// Result of a completed game: every seat, best first.
///
/// Ties on score go to the seat that reached its final space first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub standings: Vec<Standing>,
}

impl GameResult {
    /// Rank standings by score, then by arrival.
    #[must_use]
    pub fn ranked(mut standings: Vec<Standing>) -> Self {
        standings.sort_by(|a, b| b.score.cmp(&a.score).then(a.arrival.cmp(&b.arrival)));
        Self { standings }
    }

    /// The winning seat.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.standings.first().map(|s| s.player)
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    /// 1-based rank of a player.
    #[must_use]
    pub fn rank_of(&self, player: PlayerId) -> Option<usize> {
        self.standings
            .iter()
            .position(|s| s.player == player)
            .map(|i| i + 1)
    }
}
