//! Effect resolution: applying event effects to game state.
//!
//! The resolver reports whether an effect was consumed. A one-shot event is
//! spent only when its effect is consumed, so an unearned special tile
//! stays on offer for later turns.

use tracing::debug;

use crate::core::{GameState, PlayerId, PlayerKind};

use super::EventEffect;

/// Result of resolving an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The effect happened.
    Consumed,
    /// The effect did not apply this time.
    Skipped,
}

impl ResolveResult {
    /// Check if the effect happened.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

/// Applies event effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve `effect` for `player`.
    ///
    /// Panics if `player` has no seat in `state`.
    pub fn resolve(state: &mut GameState, effect: &EventEffect, player: PlayerId) -> ResolveResult {
        match effect {
            EventEffect::ButtonIncome => Self::button_income(state, player),
            EventEffect::PatchIncome(patch) => {
                debug!(%player, patch = %patch.id(), "bonus patch queued");
                state.pending.push_back(patch.clone());
                ResolveResult::Consumed
            }
            EventEffect::SpecialTile { side } => Self::special_tile(state, player, *side),
        }
    }

    fn button_income(state: &mut GameState, player: PlayerId) -> ResolveResult {
        let seat = &mut state.players[player];
        match &seat.kind {
            PlayerKind::Automa(_) => {
                // Paid at the end of the turn, scaled by the drawn card
                state.turn.button_events += 1;
                ResolveResult::Consumed
            }
            PlayerKind::Human(quilt) => {
                let income = quilt.button_income();
                if state.bank.withdraw(income) {
                    seat.buttons += income;
                    debug!(%player, income, "button income paid");
                    ResolveResult::Consumed
                } else {
                    debug!(%player, income, bank = state.bank.balance(), "bank cannot pay button income");
                    ResolveResult::Skipped
                }
            }
        }
    }

    fn special_tile(state: &mut GameState, player: PlayerId, side: i32) -> ResolveResult {
        let last_space = state.track.last_space();
        let position = state.track.position(player).unwrap_or(0);
        let seat = &mut state.players[player];
        if seat.has_special_tile {
            return ResolveResult::Skipped;
        }

        let earned = match &seat.kind {
            PlayerKind::Human(quilt) => quilt.has_filled_square(side),
            PlayerKind::Automa(automa) => automa.reached_tile_threshold(position, last_space),
        };
        if !earned {
            return ResolveResult::Skipped;
        }

        seat.has_special_tile = true;
        debug!(%player, side, "special tile awarded");
        ResolveResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automa::Difficulty;
    use crate::core::{GameConfig, PlayerSpec};
    use crate::game::Game;
    use crate::geometry::Shape;
    use crate::patches::{Patch, PatchId};

    const HUMAN: PlayerId = PlayerId::new(0);
    const AUTOMA: PlayerId = PlayerId::new(1);

    fn game() -> Game {
        let config = GameConfig::standard(vec![
            PlayerSpec::human("Ada"),
            PlayerSpec::automa("Automa", Difficulty::Craftsman),
        ]);
        Game::new(config).unwrap()
    }

    fn sew(state: &mut GameState, shape: Shape, at: (i32, i32), buttons: u32) {
        let mut patch = Patch::new(PatchId::new(900), shape, 0, 0, buttons);
        patch.absolute_move_to(at.into());
        let quilt = state.players[HUMAN].quilt_mut().unwrap();
        assert!(quilt.add(patch));
    }

    #[test]
    fn test_button_income_pays_quilt_income() {
        let mut game = game();
        let state = game.state_mut();
        sew(state, Shape::rectangle(2, 2).unwrap(), (0, 0), 3);
        let bank = state.bank.balance();

        let result = EffectResolver::resolve(state, &EventEffect::ButtonIncome, HUMAN);

        assert_eq!(result, ResolveResult::Consumed);
        assert_eq!(state.players[HUMAN].buttons, 5 + 3);
        assert_eq!(state.bank.balance(), bank - 3);
    }

    #[test]
    fn test_button_income_skipped_when_bank_short() {
        let mut game = game();
        let state = game.state_mut();
        sew(state, Shape::rectangle(2, 2).unwrap(), (0, 0), 3);
        let drained = state.bank.balance() - 2;
        assert!(state.bank.withdraw(drained));

        let result = EffectResolver::resolve(state, &EventEffect::ButtonIncome, HUMAN);

        assert_eq!(result, ResolveResult::Skipped);
        assert_eq!(state.players[HUMAN].buttons, 5);
        assert_eq!(state.bank.balance(), 2);
    }

    #[test]
    fn test_button_income_counted_for_automa() {
        let mut game = game();
        let state = game.state_mut();

        EffectResolver::resolve(state, &EventEffect::ButtonIncome, AUTOMA);
        EffectResolver::resolve(state, &EventEffect::ButtonIncome, AUTOMA);

        assert_eq!(state.turn.button_events, 2);
        assert_eq!(state.players[AUTOMA].buttons, 5);
    }

    #[test]
    fn test_patch_income_queues_in_order() {
        let mut game = game();
        let state = game.state_mut();

        for id in [40, 41] {
            let effect = EventEffect::PatchIncome(Patch::bonus(PatchId::new(id)));
            assert!(EffectResolver::resolve(state, &effect, HUMAN).is_consumed());
        }

        let ids: Vec<_> = state.pending.iter().map(|p| p.id().raw()).collect();
        assert_eq!(ids, vec![40, 41]);
    }

    #[test]
    fn test_special_tile_needs_filled_square() {
        let mut game = game();
        let state = game.state_mut();
        let tile = EventEffect::special_tile();

        assert_eq!(EffectResolver::resolve(state, &tile, HUMAN), ResolveResult::Skipped);

        sew(state, Shape::rectangle(7, 7).unwrap(), (0, 0), 0);
        assert_eq!(EffectResolver::resolve(state, &tile, HUMAN), ResolveResult::Consumed);
        assert!(state.players[HUMAN].has_special_tile);

        // At most one per player
        assert_eq!(EffectResolver::resolve(state, &tile, HUMAN), ResolveResult::Skipped);
    }

    #[test]
    fn test_special_tile_for_automa_by_position() {
        let mut game = game();
        let state = game.state_mut();
        let tile = EventEffect::special_tile();

        assert_eq!(EffectResolver::resolve(state, &tile, AUTOMA), ResolveResult::Skipped);

        // Craftsman earns it 6 spaces from the end of a 54-space track
        state.track.move_player(AUTOMA, 47).unwrap();
        assert_eq!(EffectResolver::resolve(state, &tile, AUTOMA), ResolveResult::Consumed);
        assert!(state.players[AUTOMA].has_special_tile);
    }
}
