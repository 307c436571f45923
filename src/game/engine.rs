//! The turn engine.
//!
//! [`Game`] owns a [`GameState`] and is the only thing that changes it.
//! Every turn follows the same lifecycle:
//!
//! 1. **Main action.** The acting player buys a window patch or advances.
//!    Either way their token moves and positional events in the crossed
//!    interval resolve in track order.
//! 2. **Pending patches.** Bonus patches queued by events are placed one at
//!    a time, oldest first.
//! 3. **End of turn.** Every-turn events resolve, the Automa is paid its
//!    income, and the turn passes to whoever is now furthest behind.
//!
//! ## Acting player
//!
//! The acting player is fixed when the turn starts. Moving past another
//! token mid-turn does not hand the turn over; only [`Game::end_turn`] does.
//!
//! ## Rejections
//!
//! Illegal requests (wrong patch id, acting out of phase) are errors. Legal
//! requests the rules refuse (cannot afford, does not fit) return `Ok(false)`
//! and leave the state untouched.

use std::collections::VecDeque;

use im::Vector;
use tracing::{debug, info, warn};

use crate::automa::{self, Automa, AutomaCard};
use crate::core::{
    Bank, EffectSpec, GameConfig, GameError, GameRng, GameState, MainAction, PatchChoice, PlayerId,
    PlayerMap, PlayerState, Result, SeatKind, TurnPhase, TurnRecord, TurnState,
};
use crate::effects::{EffectResolver, EventEffect};
use crate::events::{Event, EventId};
use crate::patches::{Patch, PatchId, PatchOffer};
use crate::quilt::Quilt;
use crate::rules::{GameResult, Standing};
use crate::track::ProgressTrack;

/// What the Automa did on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutomaTurn {
    pub player: PlayerId,
    pub card: AutomaCard,
    pub choice: PatchChoice,
    /// The patch bought, if any.
    pub patch: Option<PatchId>,
    /// Buttons paid at the end of the turn.
    pub income: u32,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
}

impl Game {
    /// Set up a game from `config`.
    ///
    /// The patch deck and each Automa deck are shuffled from independent
    /// streams of `config.seed`. Starting buttons are drawn from the bank.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = GameRng::new(config.seed);

        let deck = config
            .patches
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let shape = spec.shape()?;
                Ok(Patch::new(PatchId::new(i as u32), shape, spec.price, spec.moves, spec.buttons))
            })
            .collect::<Result<Vec<_>>>()?;
        let offer = PatchOffer::new(deck, &mut rng.for_context("patches"))?;

        let mut bank = Bank::new(config.starting_bank);
        let mut seats = Vec::with_capacity(config.players.len());
        for (i, spec) in config.players.iter().enumerate() {
            let mut seat = match spec.kind {
                SeatKind::Human => {
                    PlayerState::human(&spec.name, Quilt::new(config.quilt_width, config.quilt_height)?)
                }
                SeatKind::Automa { difficulty } => {
                    let stream = rng.for_context(&format!("automa-{i}"));
                    let automa = Automa::new(difficulty, config.automa_cards.clone(), stream)?;
                    PlayerState::automa(&spec.name, automa)
                }
            };
            seat.buttons = bank.withdraw_up_to(config.starting_buttons);
            seats.push(seat);
        }
        let players = PlayerMap::from_vec(seats);

        let mut track = ProgressTrack::new(config.track_spaces, players.player_ids())?;
        let mut next_bonus = config.patches.len() as u32;
        for spec in &config.events {
            let effect = match spec.effect {
                EffectSpec::ButtonIncome => EventEffect::ButtonIncome,
                EffectSpec::BonusPatch => {
                    let patch = Patch::bonus(PatchId::new(next_bonus));
                    next_bonus += 1;
                    EventEffect::PatchIncome(patch)
                }
                EffectSpec::SpecialTile { side } => EventEffect::SpecialTile { side },
            };
            let event = match spec.position {
                Some(position) => Event::at(position, effect),
                None => Event::every_turn(effect),
            };
            track
                .events_mut()
                .register(if spec.one_shot { event.once() } else { event });
        }

        let first = track.current_player().ok_or(GameError::NoPlayerCanAct)?;
        info!(
            players = players.player_count(),
            patches = offer.len(),
            events = track.events().len(),
            seed = config.seed,
            "game created"
        );

        Ok(Self {
            state: GameState {
                players,
                bank,
                track,
                offer,
                pending: VecDeque::new(),
                turn: TurnState::new(1, first),
                history: Vector::new(),
            },
            config,
        })
    }

    // === Queries ===

    /// The setup this game was created from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// A seat's state.
    pub fn player(&self, player: PlayerId) -> Result<&PlayerState> {
        self.state.players.get(player).ok_or(GameError::UnknownPlayer(player))
    }

    /// Every seat in roster order.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerState)> {
        self.state.players.iter()
    }

    /// The time track.
    #[must_use]
    pub fn track(&self) -> &ProgressTrack {
        &self.state.track
    }

    /// The patch circle.
    #[must_use]
    pub fn offer(&self) -> &PatchOffer {
        &self.state.offer
    }

    /// The bank.
    #[must_use]
    pub fn bank(&self) -> Bank {
        self.state.bank
    }

    /// Bonus patches waiting to be placed, oldest first.
    #[must_use]
    pub fn pending(&self) -> &VecDeque<Patch> {
        &self.state.pending
    }

    /// The bonus patch that must be placed next.
    #[must_use]
    pub fn pending_patch(&self) -> Option<&Patch> {
        self.state.pending.front()
    }

    /// Main actions taken so far.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.state.history
    }

    /// The player acting this turn.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.turn.player
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn.number
    }

    /// Where the current turn is.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    /// Whether every token has reached the last space.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.track.is_finished()
    }

    /// The patches currently on offer.
    #[must_use]
    pub fn window(&self) -> Vec<&Patch> {
        self.state.offer.window(self.config.window_size)
    }

    /// A seat's score under its scoring rule.
    pub fn score(&self, player: PlayerId) -> Result<i64> {
        self.player(player).map(PlayerState::score)
    }

    /// Every seat ranked by current score.
    #[must_use]
    pub fn ranking(&self) -> GameResult {
        let standings = self
            .state
            .players
            .iter()
            .map(|(player, seat)| Standing {
                player,
                name: seat.name.clone(),
                score: seat.score(),
                arrival: self.state.track.arrival(player).unwrap_or(u64::MAX),
            })
            .collect();
        GameResult::ranked(standings)
    }

    /// The final ranking, once the game is finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_finished().then(|| self.ranking())
    }

    // === Human Turn ===

    fn human_turn(&self) -> Result<PlayerId> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        let player = self.state.turn.player;
        if self.player(player)?.is_automa() {
            return Err(GameError::AutomaControlled(player));
        }
        Ok(player)
    }

    fn ensure_main_action_open(&self) -> Result<()> {
        if self.state.turn.main_action.is_some() {
            return Err(GameError::MainActionAlreadyTaken);
        }
        Ok(())
    }

    /// Pick up the window patch at `index` for positioning.
    ///
    /// Returns `None` if the acting player cannot afford it. The returned
    /// patch has its cursor at the quilt origin; manipulate it and pass it
    /// to [`Game::buy_patch`].
    pub fn select_patch(&self, index: usize) -> Result<Option<Patch>> {
        let player = self.human_turn()?;
        self.ensure_main_action_open()?;

        let window = self.window();
        let patch = window.get(index).ok_or(GameError::WindowIndexOutOfRange {
            index,
            len: window.len(),
        })?;
        if patch.price() > self.state.players[player].buttons {
            return Ok(None);
        }

        let mut cursor = (*patch).clone();
        cursor.reset_cursor();
        Ok(Some(cursor))
    }

    /// Buy a window patch and sew it at its cursor.
    ///
    /// Returns `Ok(false)` if the player cannot afford it or it does not fit.
    pub fn buy_patch(&mut self, patch: Patch) -> Result<bool> {
        let player = self.human_turn()?;
        self.ensure_main_action_open()?;

        let index = self
            .state
            .offer
            .window_position(self.config.window_size, patch.id())
            .ok_or(GameError::PatchNotInWindow(patch.id()))?;
        if !same_listing(self.window()[index], &patch) {
            return Err(GameError::PatchNotInWindow(patch.id()));
        }

        let seat = &self.state.players[player];
        if patch.price() > seat.buttons {
            debug!(%player, patch = %patch.id(), "cannot afford patch");
            return Ok(false);
        }
        let quilt = seat.quilt().ok_or(GameError::NoQuilt(player))?;
        if !quilt.can_add(&patch) {
            debug!(%player, patch = %patch.id(), origin = %patch.origin(), "patch does not fit");
            return Ok(false);
        }

        let (id, price, moves) = (patch.id(), patch.price(), patch.moves());
        self.state.offer.take(index);

        let seat = &mut self.state.players[player];
        seat.buttons -= price;
        let placed = seat.quilt_mut().ok_or(GameError::NoQuilt(player))?.add(patch);
        debug_assert!(placed, "patch passed can_add");
        self.state.bank.deposit(price);

        info!(%player, patch = %id, price, moves, "patch bought");
        self.move_and_resolve(player, MainAction::Bought { patch: id, price }, moves)?;
        Ok(true)
    }

    /// Advance past the next player ahead, earning one button per space.
    ///
    /// Returns `Ok(false)` if the player is already on the last space.
    pub fn advance(&mut self) -> Result<bool> {
        let player = self.human_turn()?;
        self.advance_player(player)
    }

    fn advance_player(&mut self, player: PlayerId) -> Result<bool> {
        self.ensure_main_action_open()?;
        if !self.state.track.player_can_advance(player) {
            return Ok(false);
        }

        let from = self
            .state
            .track
            .position(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let target = self
            .state
            .track
            .advance_target(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let spaces = (target - from) as u32;

        let paid = self.state.bank.withdraw_up_to(spaces);
        self.state.players[player].buttons += paid;

        info!(%player, from, to = target, paid, "advanced");
        self.move_and_resolve(player, MainAction::Advanced { spaces }, spaces)?;
        Ok(true)
    }

    /// Sew the next pending bonus patch at its cursor.
    ///
    /// Returns `Ok(false)` if it does not fit there.
    pub fn place_pending(&mut self, patch: Patch) -> Result<bool> {
        let player = self.human_turn()?;
        let front = self.state.pending.front().ok_or(GameError::NoPendingPatch)?;
        if !same_listing(front, &patch) {
            return Err(GameError::NotPendingPatch(patch.id()));
        }

        let quilt = self.state.players[player]
            .quilt_mut()
            .ok_or(GameError::NoQuilt(player))?;
        if !quilt.add(patch) {
            return Ok(false);
        }

        self.state.pending.pop_front();
        debug!(%player, left = self.state.pending.len(), "bonus patch placed");
        Ok(true)
    }

    /// Drop the next pending bonus patch because it fits nowhere.
    pub fn discard_pending(&mut self) -> Result<PatchId> {
        let player = self.human_turn()?;
        let front = self.state.pending.front().ok_or(GameError::NoPendingPatch)?;
        let quilt = self.player(player)?.quilt().ok_or(GameError::NoQuilt(player))?;
        if quilt.find_placement(front).is_some() {
            return Err(GameError::PendingPatchPlaceable(front.id()));
        }

        let id = front.id();
        self.state.pending.pop_front();
        warn!(%player, patch = %id, "bonus patch discarded, quilt has no room");
        Ok(id)
    }

    /// End the current turn.
    ///
    /// Returns `Ok(false)` while bonus patches are still pending.
    pub fn end_turn(&mut self) -> Result<bool> {
        if self.state.turn.main_action.is_none() {
            return Err(if self.is_finished() {
                GameError::GameFinished
            } else {
                GameError::MainActionUnresolved
            });
        }
        if !self.state.pending.is_empty() {
            return Ok(false);
        }
        self.finish_turn();
        Ok(true)
    }

    // === Automa Turn ===

    /// Play the current turn for an Automa seat, start to finish.
    pub fn play_automa_turn(&mut self) -> Result<AutomaTurn> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        let player = self.state.turn.player;
        self.ensure_main_action_open()?;

        let position = self
            .state
            .track
            .position(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let next_other = self
            .state
            .track
            .next_player_from(position + 1, Some(player))
            .and_then(|p| self.state.track.position(p));

        let card = self.automa_mut(player)?.draw_card();
        let choice = automa::choose_patch(&card, &self.window(), position, next_other);

        let mut bought = None;
        match choice {
            PatchChoice::Buy(index) => {
                let patch = self.state.offer.take(index);
                let (id, price, moves) = (patch.id(), patch.price(), patch.moves());
                self.automa_mut(player)?.acquire(patch);
                info!(%player, patch = %id, budget = card.budget, "automa bought patch");
                self.move_and_resolve(player, MainAction::Bought { patch: id, price }, moves)?;
                bought = Some(id);
            }
            PatchChoice::Advance => {
                if !self.advance_player(player)? {
                    return Err(GameError::NoPlayerCanAct);
                }
            }
        }

        while let Some(patch) = self.state.pending.pop_front() {
            self.automa_mut(player)?.acquire(patch);
        }

        let income = self.finish_turn();
        Ok(AutomaTurn {
            player,
            card,
            choice,
            patch: bought,
            income,
        })
    }

    fn automa_mut(&mut self, player: PlayerId) -> Result<&mut Automa> {
        self.state
            .players
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?
            .automa_mut()
            .ok_or(GameError::NotAutoma(player))
    }

    // === Resolution ===

    fn move_and_resolve(&mut self, player: PlayerId, action: MainAction, spaces: u32) -> Result<()> {
        let crossed = self.state.track.move_player(player, i64::from(spaces))?;
        let position = self.state.track.position(player).unwrap_or_default();

        self.state.record_main_action(action, position);
        self.state.turn.phase = TurnPhase::ResolvingPendingPatches;
        self.resolve_events(player, &crossed);
        Ok(())
    }

    fn resolve_events(&mut self, player: PlayerId, ids: &[EventId]) {
        for &id in ids {
            let Some(event) = self.state.track.events().get(id) else {
                continue;
            };
            if !event.active {
                continue;
            }
            let (effect, one_shot) = (event.effect.clone(), event.one_shot);

            let result = EffectResolver::resolve(&mut self.state, &effect, player);
            if one_shot && result.is_consumed() {
                self.state.track.events_mut().deactivate(id);
            }
            debug!(%player, event = %id, consumed = result.is_consumed(), "event resolved");
        }
    }

    fn finish_turn(&mut self) -> u32 {
        let player = self.state.turn.player;

        self.state.turn.phase = TurnPhase::ResolvingEvents;
        let recurring = self.state.track.events().recurring();
        self.resolve_events(player, &recurring);
        let income = self.pay_automa_income(player);

        self.state.turn.phase = TurnPhase::TurnEnd;
        debug!(%player, turn = self.state.turn.number, "turn ended");
        self.hand_off();
        income
    }

    fn pay_automa_income(&mut self, player: PlayerId) -> u32 {
        let events = self.state.turn.button_events;
        let seat = &mut self.state.players[player];
        let multiplier = seat
            .automa_state()
            .and_then(Automa::current_card)
            .map_or(0, |card| card.income_multiplier);

        let income = multiplier * events;
        if income == 0 || !self.state.bank.withdraw(income) {
            return 0;
        }
        seat.buttons += income;
        debug!(%player, income, events, "automa income paid");
        income
    }

    fn hand_off(&mut self) {
        let Some(next) = self.state.track.current_player() else {
            return;
        };
        self.state.turn = TurnState::new(self.state.turn.number + 1, next);

        if self.is_finished() {
            let ranking = self.ranking();
            info!(winner = ?ranking.winner(), turns = self.state.history.len(), "game finished");
        }
    }
}

/// Same patch as listed, ignoring the cursor.
fn same_listing(listed: &Patch, candidate: &Patch) -> bool {
    let mut normalized = candidate.clone();
    normalized.reset_cursor();
    let mut reference = listed.clone();
    reference.reset_cursor();
    normalized == reference
}
