//! Change notifications over a `tokio::sync::broadcast` channel.
//!
//! Views that render every container hold a plain [`EventBus::subscribe`]
//! receiver. A view that only shows some containers uses
//! [`EventBus::watch`] and never wakes for the others.

use chrono::{DateTime, Utc};
use fibertrack_core::types::EntityId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::types::EntityKind;

/// A container mutation that has been applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Dot-separated event name, e.g. `"task.updated"`.
    pub event_type: String,
    pub entity_type: Option<EntityKind>,
    pub entity_id: Option<EntityId>,
    /// User whose session issued the command. `None` for session-free
    /// commands such as analytics refreshes.
    pub actor_user_id: Option<EntityId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    /// An event about one row of one container.
    pub fn entity(
        event_type: impl Into<String>,
        kind: EntityKind,
        id: impl Into<EntityId>,
    ) -> Self {
        Self {
            entity_type: Some(kind),
            entity_id: Some(id.into()),
            ..Self::global(event_type)
        }
    }

    /// An event not tied to a single row, e.g. a metrics refresh.
    pub fn global(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity_type: None,
            entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    pub fn by(mut self, user_id: impl Into<EntityId>) -> Self {
        self.actor_user_id = Some(user_id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn concerns(&self, kind: EntityKind) -> bool {
        self.entity_type == Some(kind)
    }
}

pub const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus. Every subscriber receives every event published after it
/// subscribed.
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Receivers more than `capacity` events behind observe a lag.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Deliver `event` to current subscribers and return how many there were.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(delivered, "Change event published");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to events about the given containers only.
    pub fn watch(&self, kinds: impl IntoIterator<Item = EntityKind>) -> KindWatch {
        KindWatch {
            receiver: self.sender.subscribe(),
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Receiver returned by [`EventBus::watch`].
pub struct KindWatch {
    receiver: broadcast::Receiver<ChangeEvent>,
    kinds: Vec<EntityKind>,
}

impl KindWatch {
    /// Next event about a watched container, or `None` once the bus is gone.
    ///
    /// A lag is logged and skipped; the caller should re-read its snapshot.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.kinds.iter().any(|&kind| event.concerns(kind)) => {
                    return Some(event)
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, kinds = ?self.kinds, "Change watcher lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[tokio::test]
    async fn subscriber_receives_attributed_entity_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let delivered = bus.publish(
            ChangeEvent::entity(types::PROJECT_CREATED, EntityKind::Project, "p1")
                .by("u1")
                .with_payload(serde_json::json!({"code": "TEST-001"})),
        );
        assert_eq!(delivered, 1);

        let received = rx.recv().await.expect("event should arrive");
        assert_eq!(received.event_type, "project.created");
        assert!(received.concerns(EntityKind::Project));
        assert_eq!(received.entity_id.as_deref(), Some("p1"));
        assert_eq!(received.actor_user_id.as_deref(), Some("u1"));
        assert_eq!(received.payload["code"], "TEST-001");
    }

    #[tokio::test]
    async fn watch_skips_other_containers() {
        let bus = EventBus::default();
        let mut tasks_view = bus.watch([EntityKind::Task]);

        bus.publish(ChangeEvent::entity(types::PROJECT_UPDATED, EntityKind::Project, "p1"));
        bus.publish(ChangeEvent::global(types::METRICS_UPDATED));
        bus.publish(ChangeEvent::entity(types::TASK_UPDATED, EntityKind::Task, "t1"));
        drop(bus);

        let event = tasks_view.next().await.expect("task event");
        assert_eq!(event.entity_id.as_deref(), Some("t1"));
        assert!(tasks_view.next().await.is_none());
    }

    #[tokio::test]
    async fn lagged_watch_resumes_with_newest_events() {
        let bus = EventBus::with_capacity(2);
        let mut watch = bus.watch([EntityKind::Document]);
        for id in ["d1", "d2", "d3", "d4"] {
            bus.publish(ChangeEvent::entity(types::DOCUMENT_UPDATED, EntityKind::Document, id));
        }

        let event = watch.next().await.expect("event after lag");
        assert_eq!(event.entity_id.as_deref(), Some("d3"));
    }

    #[test]
    fn publish_without_subscribers_reaches_nobody() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(ChangeEvent::global(types::AUTH_LOGGED_OUT)), 0);
    }

    #[test]
    fn entity_kind_serializes_in_snake_case() {
        let event = ChangeEvent::entity(types::STOCK_UPDATED, EntityKind::StockItem, "inv-001");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["entity_type"], "stock_item");
        assert!(json["actor_user_id"].is_null());
    }
}
