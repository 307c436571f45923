//! The seams between the engine and whoever plays it.
//!
//! - [`PlayerAgent`]: input source for human seats
//! - [`GameResult`] and [`Standing`]: the ranked outcome

mod agent;
mod result;

pub use agent::PlayerAgent;
pub use result::{GameResult, Standing};
