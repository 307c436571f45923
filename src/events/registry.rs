//! Event registry.
//!
//! Stores the track's events and answers the two questions the turn engine
//! asks: which positional events lie in a crossed interval, and which
//! events fire every turn. Both scans skip inactive events and return ids
//! in trigger order so resolution is deterministic.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventId};

/// Registry of track events.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventRegistry {
    /// Events ordered by registration.
    events: Vec<Event>,

    /// Next event ID to allocate.
    next_id: u32,
}

impl EventRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event, returning its assigned ID.
    pub fn register(&mut self, mut event: Event) -> EventId {
        let id = EventId::new(self.next_id);
        self.next_id += 1;
        event.id = id;
        self.events.push(event);
        id
    }

    /// Get an event by ID.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Mark an event as spent.
    pub fn deactivate(&mut self, id: EventId) {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.active = false;
        }
    }

    /// Active positional events with a trigger in `(from, to]`, by position.
    #[must_use]
    pub fn crossed(&self, from: usize, to: usize) -> Vec<EventId> {
        let mut hits: Vec<(usize, EventId)> = self
            .events
            .iter()
            .filter(|e| e.active)
            .filter_map(|e| e.trigger.map(|pos| (pos, e.id)))
            .filter(|&(pos, _)| pos > from && pos <= to)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// Active events that fire every turn, by ID.
    #[must_use]
    pub fn recurring(&self) -> Vec<EventId> {
        self.events
            .iter()
            .filter(|e| e.active && e.is_recurring())
            .map(|e| e.id)
            .collect()
    }

    /// Active positional events strictly after `position`, by position.
    pub fn upcoming(&self, position: usize) -> impl Iterator<Item = &Event> {
        let mut ahead: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.active && e.trigger.is_some_and(|p| p > position))
            .collect();
        ahead.sort_by_key(|e| (e.trigger, e.id));
        ahead.into_iter()
    }

    /// Get total event count, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate all events.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
