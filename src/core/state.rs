//! Game state containers.
//!
//! ## Bank
//!
//! The finite button supply. Every payment moves buttons between the bank
//! and a player, so the total in play never changes.
//!
//! ## PlayerState
//!
//! Buttons, special tile, and either a quilt (human) or an Automa.
//!
//! ## GameState
//!
//! Everything a turn touches: players, bank, track, offer, the pending
//! patch queue, the current turn, and the history of main actions. Rule
//! logic lives in [`crate::game::Game`]; this module only stores data.

use std::collections::VecDeque;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{MainAction, TurnRecord};
use super::player::{PlayerId, PlayerMap};
use crate::automa::Automa;
use crate::patches::{Patch, PatchOffer};
use crate::quilt::Quilt;
use crate::track::ProgressTrack;

/// The shared button supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    buttons: u32,
}

impl Bank {
    /// Create a bank holding `buttons`.
    #[must_use]
    pub const fn new(buttons: u32) -> Self {
        Self { buttons }
    }

    /// Buttons left in the bank.
    #[must_use]
    pub const fn balance(&self) -> u32 {
        self.buttons
    }

    /// Check whether the bank can pay `amount` in full.
    #[must_use]
    pub const fn can_afford(&self, amount: u32) -> bool {
        self.buttons >= amount
    }

    /// Pay out `amount` in full, or nothing if the bank is short.
    pub fn withdraw(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.buttons -= amount;
        true
    }

    /// Pay out as much of `amount` as the bank holds. Returns the amount paid.
    pub fn withdraw_up_to(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.buttons);
        self.buttons -= paid;
        paid
    }

    /// Return buttons to the bank.
    pub fn deposit(&mut self, amount: u32) {
        self.buttons += amount;
    }
}

/// Who controls a seat.
#[derive(Clone, Debug)]
pub enum PlayerKind {
    /// Driven by external input; sews patches onto a quilt.
    Human(Quilt),
    /// Driven by its card deck.
    Automa(Box<Automa>),
}

/// Per-seat state.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub name: String,
    pub buttons: u32,
    pub has_special_tile: bool,
    pub kind: PlayerKind,
}

impl PlayerState {
    /// A human seat with an empty quilt.
    #[must_use]
    pub fn human(name: impl Into<String>, quilt: Quilt) -> Self {
        Self {
            name: name.into(),
            buttons: 0,
            has_special_tile: false,
            kind: PlayerKind::Human(quilt),
        }
    }

    /// An Automa seat.
    #[must_use]
    pub fn automa(name: impl Into<String>, automa: Automa) -> Self {
        Self {
            name: name.into(),
            buttons: 0,
            has_special_tile: false,
            kind: PlayerKind::Automa(Box::new(automa)),
        }
    }

    /// Check if the seat is played by the Automa.
    #[must_use]
    pub fn is_automa(&self) -> bool {
        matches!(self.kind, PlayerKind::Automa(_))
    }

    /// The seat's quilt, for humans.
    #[must_use]
    pub fn quilt(&self) -> Option<&Quilt> {
        match &self.kind {
            PlayerKind::Human(quilt) => Some(quilt),
            PlayerKind::Automa(_) => None,
        }
    }

    /// Mutable quilt access, for humans.
    pub fn quilt_mut(&mut self) -> Option<&mut Quilt> {
        match &mut self.kind {
            PlayerKind::Human(quilt) => Some(quilt),
            PlayerKind::Automa(_) => None,
        }
    }

    /// The seat's Automa state.
    #[must_use]
    pub fn automa_state(&self) -> Option<&Automa> {
        match &self.kind {
            PlayerKind::Automa(automa) => Some(automa),
            PlayerKind::Human(_) => None,
        }
    }

    /// Mutable Automa access.
    pub fn automa_mut(&mut self) -> Option<&mut Automa> {
        match &mut self.kind {
            PlayerKind::Automa(automa) => Some(automa),
            PlayerKind::Human(_) => None,
        }
    }

    /// Button income printed on the seat's patches.
    #[must_use]
    pub fn button_income(&self) -> u32 {
        match &self.kind {
            PlayerKind::Human(quilt) => quilt.button_income(),
            PlayerKind::Automa(automa) => automa.patches().iter().map(Patch::buttons).sum(),
        }
    }

    /// Current score under the seat's scoring rule.
    #[must_use]
    pub fn score(&self) -> i64 {
        match &self.kind {
            PlayerKind::Human(quilt) => quilt.score(self.buttons, self.has_special_tile),
            PlayerKind::Automa(automa) => automa.score(self.buttons, self.has_special_tile),
        }
    }
}

/// Where the current turn is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a purchase or an advance.
    #[default]
    AwaitingMainAction,
    /// The main action is done; bonus patches still need placing.
    ResolvingPendingPatches,
    /// Every-turn events and Automa income are being resolved.
    ResolvingEvents,
    /// The turn is over and about to hand off.
    TurnEnd,
}

/// Bookkeeping for the turn in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    /// Turn number, starting at 1.
    pub number: u32,

    /// The player acting this turn. Fixed until the turn ends.
    pub player: PlayerId,

    pub phase: TurnPhase,
    pub main_action: Option<MainAction>,

    /// Button-income events crossed this turn.
    pub button_events: u32,
}

impl TurnState {
    /// A fresh turn for `player`.
    #[must_use]
    pub fn new(number: u32, player: PlayerId) -> Self {
        Self {
            number,
            player,
            phase: TurnPhase::AwaitingMainAction,
            main_action: None,
            button_events: 0,
        }
    }
}

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,
    pub bank: Bank,
    pub track: ProgressTrack,
    pub offer: PatchOffer,

    /// Bonus patches waiting to be placed, oldest first.
    pub pending: VecDeque<Patch>,

    pub turn: TurnState,

    /// Main actions taken so far.
    pub history: Vector<TurnRecord>,
}

impl GameState {
    /// Record the main action of the current turn.
    pub fn record_main_action(&mut self, action: MainAction, position: usize) {
        self.turn.main_action = Some(action);
        self.history
            .push_back(TurnRecord::new(self.turn.player, action, self.turn.number, position));
    }
}
