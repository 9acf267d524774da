//! Bounded in-memory history of change events.
//!
//! [`EventJournal::run`] consumes a bus receiver until the bus is dropped,
//! keeping the most recent `capacity` events. Nothing is written to durable
//! storage.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::bus::ChangeEvent;

#[derive(Debug, Clone)]
pub struct EventJournal {
    entries: Arc<Mutex<VecDeque<ChangeEvent>>>,
    capacity: usize,
}

impl EventJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Record events from `receiver` until the channel closes.
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.record(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event journal lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Event bus closed, journal stopping");
                    break;
                }
            }
        }
    }

    pub fn record(&self, event: ChangeEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Recorded events, oldest first.
    pub fn recent(&self) -> Vec<ChangeEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ChangeEvent>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;

    #[test]
    fn oldest_entries_are_evicted() {
        let journal = EventJournal::new(2);
        journal.record(ChangeEvent::global("a"));
        journal.record(ChangeEvent::global("b"));
        journal.record(ChangeEvent::global("c"));

        let types: Vec<_> = journal.recent().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn run_drains_bus_until_closed() {
        let bus = EventBus::default();
        let journal = EventJournal::new(16);
        let handle = tokio::spawn(journal.clone().run(bus.subscribe()));

        bus.publish(ChangeEvent::global("task.created"));
        bus.publish(ChangeEvent::global("task.updated"));
        drop(bus);
        handle.await.unwrap();

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.recent()[1].event_type, "task.updated");
    }
}
