//! Automa difficulty tiers and scoring.
//!
//! ## Tile threshold
//!
//! The Automa cannot sew, so it earns the special tile by position: once it
//! is within `tile_threshold` spaces of the end of the track.
//!
//! ## Scoring
//!
//! Tiers are cumulative. Each tier scores every term of the tiers below it
//! plus one of its own:
//!
//! | Tier       | Adds                                          |
//! |------------|-----------------------------------------------|
//! | Intern     | buttons held                                  |
//! | Apprentice | special tile bonus, if held                   |
//! | Craftsman  | buttons printed on acquired patches           |
//! | Master     | acquired patch count minus [`PATCH_COUNT_PAR`]|

use serde::{Deserialize, Serialize};

use crate::patches::Patch;
use crate::quilt::SPECIAL_TILE_BONUS;

/// Patch count a Master Automa is expected to reach.
pub const PATCH_COUNT_PAR: i64 = 12;

/// Automa difficulty tier, easiest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Intern,
    Apprentice,
    Craftsman,
    Master,
}

impl Difficulty {
    /// Every tier, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Intern,
        Difficulty::Apprentice,
        Difficulty::Craftsman,
        Difficulty::Master,
    ];

    /// Spaces from the end of the track at which the special tile is earned.
    #[must_use]
    pub const fn tile_threshold(self) -> usize {
        match self {
            Difficulty::Intern => 0,
            Difficulty::Apprentice => 3,
            Difficulty::Craftsman => 6,
            Difficulty::Master => 9,
        }
    }

    /// Final score for an Automa of this tier.
    #[must_use]
    pub fn score(self, buttons: u32, patches: &[Patch], has_special_tile: bool) -> i64 {
        let mut score = i64::from(buttons);
        if self >= Difficulty::Apprentice && has_special_tile {
            score += SPECIAL_TILE_BONUS;
        }
        if self >= Difficulty::Craftsman {
            score += patches.iter().map(|p| i64::from(p.buttons())).sum::<i64>();
        }
        if self >= Difficulty::Master {
            score += patches.len() as i64 - PATCH_COUNT_PAR;
        }
        score
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Intern => "Intern",
            Difficulty::Apprentice => "Apprentice",
            Difficulty::Craftsman => "Craftsman",
            Difficulty::Master => "Master",
        };
        f.write_str(name)
    }
}
