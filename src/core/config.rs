//! Game configuration.
//!
//! A [`GameConfig`] carries every number and table a game is set up from:
//! quilt and track sizes, the bank, the patch deck, the track events, the
//! roster, and the Automa deck. It is plain serde data, so setups can be
//! loaded from JSON or any other serde format.
//!
//! [`GameConfig::standard`] returns the published two-player setup for any
//! roster. Individual values can then be overridden with the `with_*`
//! builders before the game is created.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::automa::{AutomaCard, Difficulty};
use crate::effects::SPECIAL_TILE_SIDE;
use crate::geometry::{Shape, MAX_CELL_OFFSET};

/// A patch in the deck, before ids are assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    /// Cells relative to the patch origin. Must include `(0, 0)`.
    pub cells: Vec<(i32, i32)>,
    pub price: u32,
    pub moves: u32,
    pub buttons: u32,
}

impl PatchSpec {
    /// Create a patch spec.
    #[must_use]
    pub fn new(cells: &[(i32, i32)], price: u32, moves: u32, buttons: u32) -> Self {
        Self {
            cells: cells.to_vec(),
            price,
            moves,
            buttons,
        }
    }

    /// Build the shape, validating the cells.
    pub fn shape(&self) -> Result<Shape> {
        Shape::from_pairs(&self.cells)
    }
}

/// The effect of a configured track event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSpec {
    ButtonIncome,
    /// A single-cell bonus patch.
    BonusPatch,
    SpecialTile { side: i32 },
}

/// A configured track event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Track space, or `None` to check every turn.
    pub position: Option<usize>,
    pub effect: EffectSpec,
    pub one_shot: bool,
}

impl EventSpec {
    /// A repeating event at a track space.
    #[must_use]
    pub const fn at(position: usize, effect: EffectSpec) -> Self {
        Self {
            position: Some(position),
            effect,
            one_shot: false,
        }
    }

    /// An event checked every turn.
    #[must_use]
    pub const fn every_turn(effect: EffectSpec) -> Self {
        Self {
            position: None,
            effect,
            one_shot: false,
        }
    }

    /// Make the event fire at most once (builder pattern).
    #[must_use]
    pub const fn once(mut self) -> Self {
        self.one_shot = true;
        self
    }
}

/// Who plays a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    Human,
    Automa { difficulty: Difficulty },
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub kind: SeatKind,
}

impl PlayerSpec {
    /// A human seat.
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Human,
        }
    }

    /// An Automa seat.
    #[must_use]
    pub fn automa(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Automa { difficulty },
        }
    }
}

/// Complete game setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub quilt_width: i32,
    pub quilt_height: i32,
    pub track_spaces: usize,

    /// Buttons in the bank before starting buttons are handed out.
    pub starting_bank: u32,
    pub starting_buttons: u32,

    /// Number of patches offered after the token.
    pub window_size: usize,

    pub patches: Vec<PatchSpec>,
    pub events: Vec<EventSpec>,

    /// Seats in roster order. The first seat moves first.
    pub players: Vec<PlayerSpec>,

    pub automa_cards: Vec<AutomaCard>,
    pub seed: u64,
}

/// Cells, price, moves, buttons.
type PatchRow = (&'static [(i32, i32)], u32, u32, u32);

const STANDARD_PATCHES: &[PatchRow] = &[
    (&[(0, 0), (1, 0)], 2, 1, 0),
    (&[(0, 0), (1, 0), (2, 0)], 2, 2, 0),
    (&[(0, 0), (1, 0), (0, 1)], 1, 3, 0),
    (&[(0, 0), (1, 0), (1, 1)], 3, 1, 0),
    (&[(0, 0), (1, 0), (2, 0), (3, 0)], 3, 3, 1),
    (&[(0, 0), (1, 0), (0, 1), (1, 1)], 6, 5, 2),
    (&[(0, 0), (1, 0), (2, 0), (1, 1)], 2, 2, 0),
    (&[(0, 0), (1, 0), (2, 0), (2, 1)], 4, 2, 1),
    (&[(0, 0), (0, 1), (1, 1), (2, 1)], 4, 6, 2),
    (&[(0, 0), (1, 0), (1, 1), (2, 1)], 3, 2, 1),
    (&[(0, 0), (1, 0), (1, -1), (2, -1)], 7, 6, 3),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], 7, 1, 1),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)], 10, 3, 2),
    (&[(0, 0), (0, 1), (1, 1), (2, 1), (3, 1)], 3, 4, 1),
    (&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)], 2, 2, 0),
    (&[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)], 5, 5, 2),
    (&[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)], 1, 2, 0),
    (&[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)], 5, 4, 2),
    (&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)], 2, 3, 0),
    (&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)], 10, 4, 3),
    (&[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)], 5, 3, 1),
    (&[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1)], 2, 3, 1),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (1, 1)], 3, 4, 1),
    (&[(0, 0), (0, 1), (0, 2), (1, 1), (2, 0), (2, 1), (2, 2)], 2, 3, 0),
    (&[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)], 8, 6, 3),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (1, 1), (1, -1)], 7, 2, 2),
    (&[(0, 0), (1, 0), (1, 1), (2, 1), (1, 2), (1, -1)], 4, 2, 0),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (3, 1)], 1, 2, 0),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1), (3, 1)], 10, 5, 3),
    (&[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1), (2, 0), (-2, 0)], 1, 4, 1),
    (&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2)], 10, 5, 3),
    (&[(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)], 6, 2, 2),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (1, 1), (2, 1), (3, 1)], 8, 6, 3),
];

const BUTTON_INCOME_SPACES: [usize; 9] = [5, 11, 17, 23, 29, 35, 41, 47, 53];
const BONUS_PATCH_SPACES: [usize; 5] = [26, 32, 38, 44, 50];

impl GameConfig {
    /// An empty setup with standard dimensions. Add a roster and a deck
    /// before creating a game.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quilt_width: 9,
            quilt_height: 9,
            track_spaces: 54,
            starting_bank: 150,
            starting_buttons: 5,
            window_size: 3,
            patches: Vec::new(),
            events: Vec::new(),
            players: Vec::new(),
            automa_cards: Vec::new(),
            seed: 0,
        }
    }

    /// The standard setup for `players`.
    #[must_use]
    pub fn standard(players: Vec<PlayerSpec>) -> Self {
        let patches = STANDARD_PATCHES
            .iter()
            .map(|&(cells, price, moves, buttons)| PatchSpec::new(cells, price, moves, buttons))
            .collect();

        let mut events: Vec<EventSpec> = BUTTON_INCOME_SPACES
            .iter()
            .map(|&pos| EventSpec::at(pos, EffectSpec::ButtonIncome))
            .collect();
        events.extend(
            BONUS_PATCH_SPACES
                .iter()
                .map(|&pos| EventSpec::at(pos, EffectSpec::BonusPatch).once()),
        );
        events.push(EventSpec::every_turn(EffectSpec::SpecialTile { side: SPECIAL_TILE_SIDE }).once());

        Self {
            patches,
            events,
            players,
            automa_cards: AutomaCard::standard_deck(),
            ..Self::new()
        }
    }

    /// Add a seat (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerSpec) -> Self {
        self.players.push(player);
        self
    }

    /// Add a patch to the deck (builder pattern).
    #[must_use]
    pub fn with_patch(mut self, patch: PatchSpec) -> Self {
        self.patches.push(patch);
        self
    }

    /// Add a track event (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: EventSpec) -> Self {
        self.events.push(event);
        self
    }

    /// Replace the Automa deck (builder pattern).
    #[must_use]
    pub fn with_automa_cards(mut self, cards: Vec<AutomaCard>) -> Self {
        self.automa_cards = cards;
        self
    }

    /// Set the quilt size (builder pattern).
    #[must_use]
    pub fn with_quilt_size(mut self, width: i32, height: i32) -> Self {
        self.quilt_width = width;
        self.quilt_height = height;
        self
    }

    /// Set the number of track spaces (builder pattern).
    #[must_use]
    pub fn with_track_spaces(mut self, spaces: usize) -> Self {
        self.track_spaces = spaces;
        self
    }

    /// Set the bank's starting supply (builder pattern).
    #[must_use]
    pub fn with_bank(mut self, buttons: u32) -> Self {
        self.starting_bank = buttons;
        self
    }

    /// Set each seat's starting buttons (builder pattern).
    #[must_use]
    pub fn with_starting_buttons(mut self, buttons: u32) -> Self {
        self.starting_buttons = buttons;
        self
    }

    /// Set the window size (builder pattern).
    #[must_use]
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Set the seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the setup for values no game can start from.
    pub fn validate(&self) -> Result<()> {
        if self.players.len() < 2 || self.players.len() > 255 {
            return Err(invalid(format!(
                "roster must have 2 to 255 seats, got {}",
                self.players.len()
            )));
        }
        if !(2..=MAX_CELL_OFFSET).contains(&self.quilt_width)
            || !(2..=MAX_CELL_OFFSET).contains(&self.quilt_height)
        {
            return Err(GameError::InvalidDimensions {
                width: self.quilt_width,
                height: self.quilt_height,
            });
        }
        if self.track_spaces < 2 {
            return Err(invalid(format!(
                "track needs at least 2 spaces, got {}",
                self.track_spaces
            )));
        }
        if self.window_size == 0 {
            return Err(invalid("window size must be at least 1".to_string()));
        }
        if self.patches.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        for patch in &self.patches {
            patch.shape()?;
        }
        for event in &self.events {
            if event.position.is_some_and(|p| p >= self.track_spaces) {
                return Err(invalid(format!(
                    "event at space {:?} is off a {}-space track",
                    event.position, self.track_spaces
                )));
            }
            if event.position.is_none() && event.effect == EffectSpec::BonusPatch {
                return Err(invalid("bonus patch events need a track space".to_string()));
            }
            if let EffectSpec::SpecialTile { side } = event.effect {
                if side <= 0 {
                    return Err(invalid(format!("special tile side must be positive, got {side}")));
                }
            }
        }
        let has_automa = self
            .players
            .iter()
            .any(|p| matches!(p.kind, SeatKind::Automa { .. }));
        if has_automa && self.automa_cards.is_empty() {
            return Err(invalid("automa seat without automa cards".to_string()));
        }
        let handed_out = u64::from(self.starting_buttons) * self.players.len() as u64;
        if handed_out > u64::from(self.starting_bank) {
            return Err(invalid(format!(
                "bank of {} cannot fund {} starting buttons",
                self.starting_bank, handed_out
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: String) -> GameError {
    GameError::InvalidConfig(message)
}
