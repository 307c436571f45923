//! Event effects and their resolution.
//!
//! - [`EventEffect`]: button income, bonus patch, or special tile
//! - [`EffectResolver`]: applies an effect to a player and reports whether
//!   it was consumed
//!
//! Effects never move tokens, so resolving one cannot fire further
//! positional events.

mod effect;
mod resolver;

pub use effect::{EventEffect, SPECIAL_TILE_SIDE};
pub use resolver::{EffectResolver, ResolveResult};
