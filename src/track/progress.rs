//! The time track.
//!
//! Every player's token sits on a space of a linear track. The track keeps
//! tokens in queue order: by position, then by arrival, so the first token
//! to reach a space is ahead of the ones that land on it later. The player
//! at the front of that queue is the one furthest behind, and that player
//! always takes the next turn.
//!
//! ## Movement
//!
//! Moves are clamped to `[0, last_space]`. A forward move reports every
//! active positional event in `(old, new]`; the caller resolves them. The
//! moved token is always requeued at the tail of its new space.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::error::{GameError, Result};
use crate::core::PlayerId;
use crate::events::{EventId, EventRegistry};

/// A token on the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    pub player: PlayerId,
    pub position: usize,
    /// Arrival sequence number; lower arrived first.
    pub seq: u64,
}

/// Player positions plus the events placed on the track.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressTrack {
    spaces: usize,

    /// Tokens sorted by `(position, seq)`.
    entries: Vec<TrackEntry>,

    next_seq: u64,
    events: EventRegistry,
}

impl ProgressTrack {
    /// Create a track with every player on space 0, queued in roster order.
    pub fn new(spaces: usize, players: impl IntoIterator<Item = PlayerId>) -> Result<Self> {
        if spaces < 2 {
            return Err(GameError::InvalidConfig(format!(
                "track needs at least 2 spaces, got {spaces}"
            )));
        }

        let mut track = Self {
            spaces,
            entries: Vec::new(),
            next_seq: 0,
            events: EventRegistry::new(),
        };
        for player in players {
            let seq = track.bump_seq();
            track.entries.push(TrackEntry { player, position: 0, seq });
        }
        Ok(track)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Number of spaces.
    #[must_use]
    pub fn spaces(&self) -> usize {
        self.spaces
    }

    /// Index of the final space.
    #[must_use]
    pub fn last_space(&self) -> usize {
        self.spaces - 1
    }

    /// Tokens in queue order.
    #[must_use]
    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }

    /// Events on this track.
    #[must_use]
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Mutable access to the events, for setup and deactivation.
    pub fn events_mut(&mut self) -> &mut EventRegistry {
        &mut self.events
    }

    fn entry(&self, player: PlayerId) -> Option<&TrackEntry> {
        self.entries.iter().find(|e| e.player == player)
    }

    /// A player's space.
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<usize> {
        self.entry(player).map(|e| e.position)
    }

    /// A player's arrival sequence number on their current space.
    #[must_use]
    pub fn arrival(&self, player: PlayerId) -> Option<u64> {
        self.entry(player).map(|e| e.seq)
    }

    /// First player in queue order at or beyond `position`.
    ///
    /// With a `perspective`, that player is never returned, and players
    /// sharing the perspective player's space count as being at or beyond
    /// `position`.
    #[must_use]
    pub fn next_player_from(&self, position: usize, perspective: Option<PlayerId>) -> Option<PlayerId> {
        let own = perspective.and_then(|p| self.position(p));
        self.entries
            .iter()
            .filter(|e| Some(e.player) != perspective)
            .find(|e| e.position >= position || Some(e.position) == own)
            .map(|e| e.player)
    }

    /// The player who takes the next turn: the one furthest behind.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.next_player_from(0, None)
    }

    /// Whether `player` can still advance: not on the last space, and some
    /// other token is ahead or shares the space.
    #[must_use]
    pub fn player_can_advance(&self, player: PlayerId) -> bool {
        self.position(player).is_some_and(|p| {
            p < self.last_space() && self.next_player_from(p + 1, Some(player)).is_some()
        })
    }

    /// Where an advance would take `player`: one space past the next player
    /// ahead, or one space forward when nobody is ahead. Clamped to the
    /// last space.
    #[must_use]
    pub fn advance_target(&self, player: PlayerId) -> Option<usize> {
        let position = self.position(player)?;
        let target = self
            .next_player_from(position + 1, Some(player))
            .and_then(|next| self.position(next))
            .map_or(position + 1, |p| p + 1);
        Some(target.min(self.last_space()))
    }

    /// Move `player` by `delta` spaces, clamped to the track.
    ///
    /// Returns the active positional events crossed by a forward move,
    /// ordered by position. A backward move crosses nothing.
    pub fn move_player(&mut self, player: PlayerId, delta: i64) -> Result<Vec<EventId>> {
        let index = self
            .entries
            .iter()
            .position(|e| e.player == player)
            .ok_or(GameError::UnknownPlayer(player))?;

        let old = self.entries.remove(index).position;
        let new = (old as i64).saturating_add(delta).clamp(0, self.last_space() as i64) as usize;

        let crossed = if new > old {
            self.events.crossed(old, new)
        } else {
            Vec::new()
        };

        let seq = self.bump_seq();
        let slot = self.entries.partition_point(|e| e.position <= new);
        self.entries.insert(slot, TrackEntry { player, position: new, seq });

        trace!(%player, from = old, to = new, events = crossed.len(), "moved on track");
        Ok(crossed)
    }

    /// Whether every token is on the last space.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.entries
            .first()
            .map_or(true, |e| e.position == self.last_space())
    }
}
