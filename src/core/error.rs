//! Engine error type.
//!
//! Only two kinds of failure are errors:
//! - **Precondition violations**: the caller or the setup data is wrong
//!   (an empty shape, a patch that is not in the window, a zero-sized quilt).
//! - **Invariant violations**: the turn sequence is broken (ending a turn
//!   before its main action, acting after the game finished).
//!
//! Rule rejections ("that patch does not fit", "you cannot afford it") are
//! not errors. Operations report them as `Ok(false)` or `Ok(None)` and leave
//! the state untouched.

use crate::core::PlayerId;
use crate::patches::PatchId;

/// Errors raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("shape has no cells or a cell out of range")]
    InvalidShape,
    #[error("shape does not contain its local origin (0, 0)")]
    MissingOrigin,
    #[error("dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("patch deck is empty")]
    EmptyDeck,
    #[error("patch {0} is not in the current window")]
    PatchNotInWindow(PatchId),
    #[error("window index {index} out of range (window has {len} patches)")]
    WindowIndexOutOfRange { index: usize, len: usize },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("{0} has no quilt")]
    NoQuilt(PlayerId),
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("turn cannot end before its main action")]
    MainActionUnresolved,
    #[error("main action already taken this turn")]
    MainActionAlreadyTaken,
    #[error("no pending patch to place")]
    NoPendingPatch,
    #[error("patch {0} is not the next pending patch")]
    NotPendingPatch(PatchId),
    #[error("pending patch {0} can still be placed")]
    PendingPatchPlaceable(PatchId),
    #[error("{0} is played by the Automa")]
    AutomaControlled(PlayerId),
    #[error("{0} is not an Automa")]
    NotAutoma(PlayerId),
    #[error("game already finished")]
    GameFinished,
    #[error("no player can act")]
    NoPlayerCanAct,
    #[error("snapshot encoding failed: {0}")]
    Encode(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GameError>;
