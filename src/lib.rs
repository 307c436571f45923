//! # rust-patchwork
//!
//! A game-state engine for a two-or-more player quilt-building game, with a
//! card-driven Automa opponent.
//!
//! Players buy polyomino patches from a revolving circle, sew them onto a
//! personal quilt, and spend time on a shared track. Whoever is furthest
//! behind on the track moves next.
//!
//! ## Design Principles
//!
//! 1. **Engine, not front end**: no rendering or input handling. Front ends
//!    read [`game::GameSnapshot`]s and drive [`game::Game`] directly or
//!    through a [`rules::PlayerAgent`].
//!
//! 2. **N-Player**: the roster is any mix of human and Automa seats.
//!
//! 3. **Configuration Over Convention**: sizes, decks, and track events come
//!    from a serde [`core::GameConfig`]. [`core::GameConfig::standard`] is
//!    just one setup.
//!
//! 4. **Deterministic**: all shuffling comes from one seed.
//!
//! ## Modules
//!
//! - `geometry`: coordinates, shapes, and rotation variants
//! - `patches`: patches with placement cursors, and the patch circle
//! - `quilt`: per-player placement validation and scoring
//! - `events`: track events and the registry that schedules them
//! - `effects`: event effects and their resolution
//! - `track`: token positions and turn order
//! - `automa`: the Automa's cards, policy, and difficulty tiers
//! - `core`: players, state, actions, RNG, configuration, errors
//! - `rules`: the agent seam and final standings
//! - `game`: the turn engine, snapshots, and a reference turn loop

pub mod automa;
pub mod core;
pub mod effects;
pub mod events;
pub mod game;
pub mod geometry;
pub mod patches;
pub mod quilt;
pub mod rules;
pub mod track;

// Re-export commonly used types
pub use crate::core::{
    Bank, Command, GameConfig, GameError, GameRng, GameState, MainAction, PatchChoice, PlayerId,
    PlayerMap, PlayerSpec, PlayerState, Result, TurnPhase,
};

pub use crate::geometry::{Coord, Shape};

pub use crate::patches::{Patch, PatchId, PatchOffer};

pub use crate::quilt::Quilt;

pub use crate::track::ProgressTrack;

pub use crate::events::{Event, EventId, EventRegistry};

pub use crate::effects::{EffectResolver, EventEffect};

pub use crate::automa::{Automa, AutomaCard, Difficulty, PatchFilter};

pub use crate::rules::{GameResult, PlayerAgent, Standing};

pub use crate::game::{drive_turn, AutomaTurn, Game, GameSnapshot, TurnOutcome};
