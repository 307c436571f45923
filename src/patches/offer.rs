//! The revolving patch offer.
//!
//! All patches sit in a fixed circle (shuffled once at setup). A neutral
//! token points at one of them; the patches strictly after the token form
//! the window players may buy from. Buying a patch removes it from the
//! circle and moves the token to where it was, so the next window starts
//! right after the bought patch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patch::{Patch, PatchId};
use crate::core::error::{GameError, Result};
use crate::core::GameRng;

/// Circular patch pool with a neutral token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatchOffer {
    patches: Vec<Patch>,
    token: usize,
}

impl PatchOffer {
    /// Shuffle the patches and place the token on the smallest one.
    ///
    /// The token starts on the first patch with the fewest cells, so every
    /// game opens with the same relation between the token and the deck.
    pub fn new(patches: impl IntoIterator<Item = Patch>, rng: &mut GameRng) -> Result<Self> {
        let mut patches: Vec<Patch> = patches.into_iter().collect();
        if patches.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        rng.shuffle(&mut patches);
        Ok(Self::with_order(patches))
    }

    /// Use the patches in the given order, without shuffling.
    ///
    /// Panics if `patches` is empty.
    #[must_use]
    pub fn with_order(patches: Vec<Patch>) -> Self {
        assert!(!patches.is_empty(), "Patch offer needs at least one patch");

        let token = patches
            .iter()
            .enumerate()
            .min_by_key(|(i, p)| (p.cell_count(), *i))
            .map_or(0, |(i, _)| i);

        Self { patches, token }
    }

    /// Number of patches left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if every patch has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Index of the neutral token.
    #[must_use]
    pub fn token(&self) -> usize {
        self.token
    }

    /// The patch under the neutral token.
    #[must_use]
    pub fn token_patch(&self) -> &Patch {
        &self.patches[self.token]
    }

    /// All patches in circle order starting at index 0.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// The next `n` patches after the token, wrapping.
    ///
    /// `n` is capped at the number of patches so nothing is listed twice.
    #[must_use]
    pub fn window(&self, n: usize) -> Vec<&Patch> {
        let size = self.patches.len();
        (1..=n.min(size))
            .map(|i| &self.patches[(self.token + i) % size])
            .collect()
    }

    /// Find a patch in the first `n` window slots.
    #[must_use]
    pub fn window_position(&self, n: usize, id: PatchId) -> Option<usize> {
        self.window(n).iter().position(|p| p.id() == id)
    }

    /// Move the token forward.
    ///
    /// Panics if the offer is empty.
    pub fn advance(&mut self, steps: usize) {
        assert!(!self.patches.is_empty(), "Cannot advance an empty patch offer");
        self.token = (self.token + steps) % self.patches.len();
    }

    /// Remove the patch right after the token.
    ///
    /// Panics if the offer is empty.
    pub fn remove_current_window_head(&mut self) -> Patch {
        assert!(!self.patches.is_empty(), "Cannot take from an empty patch offer");

        let index = (self.token + 1) % self.patches.len();
        let patch = self.patches.remove(index);

        if self.patches.is_empty() {
            self.token = 0;
        } else if index <= self.token {
            // Removal wrapped to the front; everything after shifted left
            self.token = (self.token + self.patches.len() - 1) % self.patches.len();
        }
        patch
    }

    /// Take the patch at `window_index` and leave the token in its place.
    ///
    /// Panics if the offer is empty.
    pub fn take(&mut self, window_index: usize) -> Patch {
        self.advance(window_index);
        let patch = self.remove_current_window_head();
        debug!(patch = %patch.id(), token = self.token, left = self.patches.len(), "patch taken from offer");
        patch
    }
}
