//! Track events.
//!
//! An event pairs an effect with when it fires: either a track position
//! (fires when a player moves onto or past it) or every turn. One-shot
//! events go inactive after their effect reports that it was consumed.

use serde::{Deserialize, Serialize};

use crate::effects::EventEffect;

/// Unique identifier for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl EventId {
    /// Create a new event ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// An event definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, assigned by the registry.
    pub id: EventId,

    /// Track position that triggers the event. `None` fires every turn.
    pub trigger: Option<usize>,

    /// What happens when it fires.
    pub effect: EventEffect,

    /// Goes inactive once the effect is consumed.
    pub one_shot: bool,

    /// Inactive events are skipped by every scan.
    pub active: bool,
}

impl Event {
    /// An event at a track position.
    #[must_use]
    pub fn at(position: usize, effect: EventEffect) -> Self {
        Self {
            id: EventId::new(0),
            trigger: Some(position),
            effect,
            one_shot: false,
            active: true,
        }
    }

    /// An event checked at the end of every turn.
    #[must_use]
    pub fn every_turn(effect: EventEffect) -> Self {
        Self {
            id: EventId::new(0),
            trigger: None,
            effect,
            one_shot: false,
            active: true,
        }
    }

    /// Make the event fire at most once (builder pattern).
    #[must_use]
    pub fn once(mut self) -> Self {
        self.one_shot = true;
        self
    }

    /// Check if the event fires every turn rather than at a position.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.trigger.is_none()
    }

    /// Human-readable summary for renderers.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.trigger {
            Some(position) => format!("{} at space {}", self.effect.describe(), position),
            None => format!("{} (checked every turn)", self.effect.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id() {
        let id = EventId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Event(3)");
    }

    #[test]
    fn test_builders() {
        let income = Event::at(5, EventEffect::ButtonIncome);
        assert_eq!(income.trigger, Some(5));
        assert!(!income.one_shot);
        assert!(income.active);
        assert!(!income.is_recurring());

        let tile = Event::every_turn(EventEffect::special_tile()).once();
        assert!(tile.is_recurring());
        assert!(tile.one_shot);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Event::at(5, EventEffect::ButtonIncome).describe(), "button income at space 5");
        assert_eq!(
            Event::every_turn(EventEffect::special_tile()).describe(),
            "7x7 special tile (checked every turn)"
        );
    }
}
