//! Automa decision cards.
//!
//! Each turn the Automa draws one card. The card sets a virtual button
//! budget for the purchase, a multiplier for button income, and an ordered
//! list of filters that narrow the affordable patches down to one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A candidate filter, applied in card order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatchFilter {
    /// Keep the patches with the most cells.
    Largest,
    /// Keep the patches with the most buttons.
    MostButtons,
    /// Keep the patches that do not carry the Automa past the next player
    /// ahead. Skipped when it would leave nothing, or when nobody is ahead.
    NoOvertake,
}

/// One card of the Automa deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaCard {
    /// Most the Automa will "pay" this turn. Never taken from its buttons.
    pub budget: u32,

    /// Buttons earned per button-income event crossed this turn.
    pub income_multiplier: u32,

    pub filters: SmallVec<[PatchFilter; 3]>,
}

impl AutomaCard {
    /// A card with no filters.
    #[must_use]
    pub fn new(budget: u32, income_multiplier: u32) -> Self {
        Self {
            budget,
            income_multiplier,
            filters: SmallVec::new(),
        }
    }

    /// Append a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: PatchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// The nine cards of a standard Automa deck.
    #[must_use]
    pub fn standard_deck() -> Vec<AutomaCard> {
        use PatchFilter::*;

        vec![
            AutomaCard::new(2, 1).with_filter(Largest).with_filter(NoOvertake),
            AutomaCard::new(3, 1).with_filter(MostButtons).with_filter(Largest),
            AutomaCard::new(3, 2).with_filter(NoOvertake).with_filter(MostButtons),
            AutomaCard::new(4, 1).with_filter(Largest).with_filter(MostButtons),
            AutomaCard::new(4, 2).with_filter(MostButtons).with_filter(NoOvertake),
            AutomaCard::new(5, 1).with_filter(NoOvertake).with_filter(Largest),
            AutomaCard::new(5, 2)
                .with_filter(Largest)
                .with_filter(MostButtons)
                .with_filter(NoOvertake),
            AutomaCard::new(6, 1).with_filter(MostButtons),
            AutomaCard::new(7, 2).with_filter(Largest),
        ]
    }
}
