//! Reference turn loop.
//!
//! [`drive_turn`] plays one whole turn: Automa seats play themselves, human
//! seats are asked for choices through a [`PlayerAgent`]. Front ends with
//! their own event loop can call the [`Game`] methods directly instead.

use tracing::{debug, trace};

use crate::core::{Command, GameError, PatchChoice, Result};
use crate::patches::Patch;
use crate::rules::PlayerAgent;

use super::Game;

/// Cursor commands accepted for one patch before the agent is cut off.
pub const MAX_COMMANDS: usize = 10_000;

/// How far a driven turn got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn ended and the next player is up.
    Completed,
    /// The agent had no answer, or cancelled. Call again to resume.
    Stalled,
}

#[derive(Clone, Copy)]
enum Target {
    Purchase,
    Pending,
}

/// Play the current turn to its end, or until the agent stalls.
pub fn drive_turn(game: &mut Game, agent: &mut dyn PlayerAgent) -> Result<TurnOutcome> {
    if game.is_finished() {
        return Err(GameError::GameFinished);
    }
    if game.player(game.current_player())?.is_automa() {
        game.play_automa_turn()?;
        return Ok(TurnOutcome::Completed);
    }

    if game.state().turn.main_action.is_none() {
        match agent.choose_patch(game) {
            None => return Ok(TurnOutcome::Stalled),
            Some(PatchChoice::Advance) => {
                if !game.advance()? {
                    return Err(GameError::NoPlayerCanAct);
                }
            }
            Some(PatchChoice::Buy(index)) => {
                let Some(patch) = game.select_patch(index)? else {
                    debug!(index, "agent chose an unaffordable patch");
                    return Ok(TurnOutcome::Stalled);
                };
                if !position_patch(game, agent, patch, Target::Purchase)? {
                    return Ok(TurnOutcome::Stalled);
                }
            }
        }
    }

    while let Some(patch) = game.pending_patch().cloned() {
        let quilt = game
            .player(game.current_player())?
            .quilt()
            .ok_or(GameError::NoQuilt(game.current_player()))?;
        if quilt.find_placement(&patch).is_none() {
            game.discard_pending()?;
            continue;
        }
        if !position_patch(game, agent, patch, Target::Pending)? {
            return Ok(TurnOutcome::Stalled);
        }
    }

    game.end_turn()?;
    Ok(TurnOutcome::Completed)
}

fn position_patch(
    game: &mut Game,
    agent: &mut dyn PlayerAgent,
    mut patch: Patch,
    target: Target,
) -> Result<bool> {
    let (width, height) = (game.config().quilt_width, game.config().quilt_height);

    for _ in 0..MAX_COMMANDS {
        match agent.choose_command(&patch, game) {
            None | Some(Command::Cancel) => return Ok(false),
            Some(Command::Place) => {
                let placed = match target {
                    Target::Purchase => game.buy_patch(patch.clone())?,
                    Target::Pending => game.place_pending(patch.clone())?,
                };
                if placed {
                    return Ok(true);
                }
                trace!(patch = %patch.id(), origin = %patch.origin(), "placement refused");
            }
            Some(command) => {
                patch.apply(command, width, height);
            }
        }
    }
    debug!(patch = %patch.id(), "agent exceeded command limit");
    Ok(false)
}
