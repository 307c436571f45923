//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! Everything here is plain data. The rules that move a game forward live in
//! [`crate::game`].

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Command, MainAction, PatchChoice, TurnRecord};
pub use config::{EffectSpec, EventSpec, GameConfig, PatchSpec, PlayerSpec, SeatKind};
pub use error::{GameError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{Bank, GameState, PlayerKind, PlayerState, TurnPhase, TurnState};
