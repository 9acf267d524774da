//! Equipment and verification commands.

use std::sync::Arc;

use chrono::NaiveDate;
use fibertrack_db::models::equipment::{
    CreateEquipment, CreateVerification, Equipment, UpdateEquipment, Verification,
};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn create_equipment(
    state: &AppState,
    session: &Session,
    input: CreateEquipment,
) -> AppResult<Equipment> {
    state.authorize(session).await?;
    let equipment = state.equipment.write().await.add(input)?;
    publish_change(
        state,
        session,
        event_types::EQUIPMENT_CREATED,
        EntityKind::Equipment,
        &equipment.id,
        &equipment,
    );
    Ok(equipment)
}

pub async fn update_equipment(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateEquipment,
) -> AppResult<Option<Equipment>> {
    state.authorize(session).await?;
    let updated = state.equipment.write().await.update(id, input);
    if let Some(equipment) = &updated {
        publish_change(state, session, event_types::EQUIPMENT_UPDATED, EntityKind::Equipment, id, equipment);
    }
    Ok(updated)
}

pub async fn remove_equipment(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Equipment>> {
    state.authorize(session).await?;
    let removed = state.equipment.write().await.remove(id);
    if let Some(equipment) = &removed {
        publish_change(state, session, event_types::EQUIPMENT_REMOVED, EntityKind::Equipment, id, equipment);
    }
    Ok(removed)
}

/// Append a verification record. `None` when the equipment id is unknown.
pub async fn record_verification(
    state: &AppState,
    session: &Session,
    equipment_id: &str,
    input: CreateVerification,
) -> AppResult<Option<Verification>> {
    state.authorize(session).await?;
    let recorded = state
        .equipment
        .write()
        .await
        .add_verification(equipment_id, input);
    if let Some(verification) = &recorded {
        publish_change(
            state,
            session,
            event_types::EQUIPMENT_VERIFIED,
            EntityKind::Equipment,
            equipment_id,
            verification,
        );
    }
    Ok(recorded)
}

pub async fn list_equipment(state: &AppState) -> Arc<Vec<Equipment>> {
    state.equipment.read().await.list()
}

pub async fn verifications_due(state: &AppState, as_of: NaiveDate) -> Vec<Equipment> {
    state.equipment.read().await.verifications_due(as_of)
}
