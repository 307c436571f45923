//! Track events: positional and every-turn rule effects.
//!
//! - [`Event`]: a trigger (position or every turn), an effect, and
//!   one-shot/active flags
//! - [`EventRegistry`]: storage plus the interval and recurring scans
//!
//! Events are data. Resolving them is the job of
//! [`crate::effects::EffectResolver`]; the registry only decides which
//! events are due.

mod event;
mod registry;

pub use event::{Event, EventId};
pub use registry::EventRegistry;
