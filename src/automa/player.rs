//! The Automa's own state: its card deck and acquired patches.

use tracing::trace;

use crate::core::error::{GameError, Result};
use crate::core::GameRng;
use crate::patches::Patch;

use super::card::AutomaCard;
use super::difficulty::Difficulty;

/// A rule-driven opponent.
///
/// The Automa keeps the patches it buys in a pile instead of a quilt. Its
/// deck is reshuffled whenever every card has been drawn.
#[derive(Clone, Debug)]
pub struct Automa {
    difficulty: Difficulty,

    /// Cards before `next` have been drawn since the last shuffle.
    deck: Vec<AutomaCard>,
    next: usize,

    current: Option<AutomaCard>,
    patches: Vec<Patch>,
    rng: GameRng,
}

impl Automa {
    /// Create an Automa with a freshly shuffled deck.
    pub fn new(difficulty: Difficulty, cards: Vec<AutomaCard>, mut rng: GameRng) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::InvalidConfig("automa deck is empty".to_string()));
        }
        let mut deck = cards;
        rng.shuffle(&mut deck);

        Ok(Self {
            difficulty,
            deck,
            next: 0,
            current: None,
            patches: Vec::new(),
            rng,
        })
    }

    /// Difficulty tier.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The card drawn this turn, if any.
    #[must_use]
    pub fn current_card(&self) -> Option<&AutomaCard> {
        self.current.as_ref()
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len() - self.next
    }

    /// Draw the card for this turn, reshuffling first if the deck is spent.
    pub fn draw_card(&mut self) -> AutomaCard {
        if self.next == self.deck.len() {
            self.rng.shuffle(&mut self.deck);
            self.next = 0;
            trace!(cards = self.deck.len(), "automa deck reshuffled");
        }

        let card = self.deck[self.next].clone();
        self.next += 1;
        self.current = Some(card.clone());
        card
    }

    /// Patches acquired so far.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Add a bought or granted patch to the pile.
    pub fn acquire(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Whether a token at `position` is close enough to the end for the
    /// special tile.
    #[must_use]
    pub fn reached_tile_threshold(&self, position: usize, last_space: usize) -> bool {
        position + self.difficulty.tile_threshold() >= last_space
    }

    /// Final score for this Automa.
    #[must_use]
    pub fn score(&self, buttons: u32, has_special_tile: bool) -> i64 {
        self.difficulty.score(buttons, &self.patches, has_special_tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automa::PatchFilter;
    use crate::geometry::Shape;
    use crate::patches::PatchId;

    fn deck() -> Vec<AutomaCard> {
        (1..=3)
            .map(|b| AutomaCard::new(b, 1).with_filter(PatchFilter::Largest))
            .collect()
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(Automa::new(Difficulty::Intern, Vec::new(), GameRng::new(1)).is_err());
    }

    #[test]
    fn test_draw_cycles_through_deck() {
        let mut automa = Automa::new(Difficulty::Intern, deck(), GameRng::new(7)).unwrap();

        let mut budgets: Vec<u32> = (0..3).map(|_| automa.draw_card().budget).collect();
        budgets.sort_unstable();
        assert_eq!(budgets, vec![1, 2, 3]);
        assert_eq!(automa.cards_remaining(), 0);

        // Reshuffle
        let card = automa.draw_card();
        assert_eq!(automa.cards_remaining(), 2);
        assert_eq!(automa.current_card(), Some(&card));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = Automa::new(Difficulty::Master, deck(), GameRng::new(3)).unwrap();
        let mut b = Automa::new(Difficulty::Master, deck(), GameRng::new(3)).unwrap();

        for _ in 0..7 {
            assert_eq!(a.draw_card(), b.draw_card());
        }
    }

    #[test]
    fn test_tile_threshold() {
        let automa = Automa::new(Difficulty::Apprentice, deck(), GameRng::new(1)).unwrap();

        assert!(!automa.reached_tile_threshold(49, 53));
        assert!(automa.reached_tile_threshold(50, 53));
        assert!(automa.reached_tile_threshold(53, 53));
    }

    #[test]
    fn test_acquire_and_score() {
        let mut automa = Automa::new(Difficulty::Craftsman, deck(), GameRng::new(1)).unwrap();
        automa.acquire(Patch::bonus(PatchId::new(1)));
        automa.acquire(Patch::new(PatchId::new(2), Shape::rectangle(2, 2).unwrap(), 4, 2, 3));

        assert_eq!(automa.patches().len(), 2);
        assert_eq!(automa.score(5, false), 8);
    }
}
