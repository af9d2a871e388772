//! Bounded history of what a session did.
use std::collections::VecDeque;

use ops_core::{ActionId, CityEvent, CityName, Completion};
use serde::Serialize;

/// One entry of the session history.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    ActionStarted { id: ActionId },
    ActionReset { id: ActionId },
    Completed(Completion),
    /// The action could not repeat and was cleared.
    ActionStopped { id: ActionId, reason: String },
    City(CityEvent),
    SkillUpgraded { skill: String, levels: u32, cost: u64 },
    TeamAssigned { id: ActionId, size: u64 },
    CitySwitched { from: CityName, to: CityName },
}

/// Circular buffer of the most recent session events.
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: VecDeque<SessionEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(event);
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &SessionEvent> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events evicted since the log was created.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops_core::ActionType;

    fn started(name: &str) -> SessionEvent {
        SessionEvent::ActionStarted {
            id: ActionId::new(ActionType::General, name),
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = EventLog::new(2);
        log.push(started("a"));
        log.push(started("b"));
        log.push(started("c"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 1);
        let newest: Vec<_> = log.recent(5).cloned().collect();
        assert_eq!(newest, vec![started("c"), started("b")]);
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut log = EventLog::new(0);
        log.push(started("a"));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
    }
}
