//! Command functions over [`AppState`](crate::state::AppState).
//!
//! Mutating commands take the caller's [`Session`](crate::auth::Session),
//! fail with `Unauthorized` when it is not the active one, and publish one
//! change event after a successful mutation. An update or removal of an
//! absent id returns `None` and publishes nothing. Reads need no session.

pub mod analytics;
pub mod auth;
pub mod documents;
pub mod employees;
pub mod equipment;
pub mod inventory;
pub mod materials;
pub mod projects;
pub mod tasks;

use fibertrack_events::{ChangeEvent, EntityKind};
use serde::Serialize;

use crate::auth::Session;
use crate::state::AppState;

/// Publish `event_type` for an entity, attributed to `session`.
pub(crate) fn publish_change<T: Serialize>(
    state: &AppState,
    session: &Session,
    event_type: &str,
    entity_type: EntityKind,
    entity_id: &str,
    body: &T,
) {
    let payload = match serde_json::to_value(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, event_type, "Event payload not serializable");
            serde_json::Value::Null
        }
    };
    state.event_bus.publish(
        ChangeEvent::entity(event_type, entity_type, entity_id)
            .by(session.user_id.clone())
            .with_payload(payload),
    );
}
