//! Patches and the shared patch offer.
//!
//! - `Patch`: shape, economics, and the placement cursor
//! - `PatchOffer`: the shuffled circle of patches and its neutral token

pub mod offer;
pub mod patch;

pub use offer::PatchOffer;
pub use patch::{Patch, PatchId, MAX_ORIGIN_OFFSET};
