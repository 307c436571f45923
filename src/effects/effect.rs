//! Event effect definitions.
//!
//! Effects are the rule consequences attached to track events. They carry
//! data only; [`super::EffectResolver`] applies them to a game state.

use serde::{Deserialize, Serialize};

use crate::patches::Patch;

/// Side of the filled square that earns the special tile in a standard game.
pub const SPECIAL_TILE_SIDE: i32 = 7;

/// An effect fired by a track event.
///
/// ## Button Income
///
/// Humans are paid their quilt's button income from the bank. For the
/// Automa the firing is only counted; its income is paid once at the end
/// of the turn.
///
/// ## Patch Income
///
/// Queues a bonus patch the player must place before ending the turn.
///
/// ## Special Tile
///
/// Awarded to the first player whose quilt contains a filled
/// `side x side` square, or to the Automa once it is close enough to the
/// end of the track for its difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventEffect {
    /// Pay button income.
    ButtonIncome,

    /// Grant a bonus patch.
    PatchIncome(Patch),

    /// Award the special tile.
    SpecialTile {
        /// Side of the square that must be filled.
        side: i32,
    },
}

impl EventEffect {
    /// The standard 7x7 special-tile effect.
    #[must_use]
    pub const fn special_tile() -> Self {
        Self::SpecialTile { side: SPECIAL_TILE_SIDE }
    }

    /// Human-readable summary.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::ButtonIncome => "button income".to_string(),
            Self::PatchIncome(patch) => format!("bonus patch {}", patch.id()),
            Self::SpecialTile { side } => format!("{side}x{side} special tile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patches::PatchId;

    #[test]
    fn test_describe() {
        assert_eq!(EventEffect::ButtonIncome.describe(), "button income");
        assert_eq!(
            EventEffect::PatchIncome(Patch::bonus(PatchId::new(40))).describe(),
            "bonus patch Patch(40)"
        );
        assert_eq!(EventEffect::SpecialTile { side: 5 }.describe(), "5x5 special tile");
    }

    #[test]
    fn test_serialization() {
        let effect = EventEffect::PatchIncome(Patch::bonus(PatchId::new(1)));
        let json = serde_json::to_string(&effect).unwrap();
        let back: EventEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
