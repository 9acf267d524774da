//! Material commands.

use std::sync::Arc;

use chrono::NaiveDate;
use fibertrack_db::models::material::{CreateMaterial, Material, UpdateMaterial};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn create_material(
    state: &AppState,
    session: &Session,
    input: CreateMaterial,
) -> AppResult<Material> {
    state.authorize(session).await?;
    let material = state.materials.write().await.add(input)?;
    publish_change(
        state,
        session,
        event_types::MATERIAL_CREATED,
        EntityKind::Material,
        &material.id,
        &material,
    );
    Ok(material)
}

pub async fn update_material(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateMaterial,
) -> AppResult<Option<Material>> {
    state.authorize(session).await?;
    let updated = state.materials.write().await.update(id, input)?;
    if let Some(material) = &updated {
        publish_change(state, session, event_types::MATERIAL_UPDATED, EntityKind::Material, id, material);
    }
    Ok(updated)
}

pub async fn remove_material(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Material>> {
    state.authorize(session).await?;
    let removed = state.materials.write().await.remove(id);
    if let Some(material) = &removed {
        publish_change(state, session, event_types::MATERIAL_REMOVED, EntityKind::Material, id, material);
    }
    Ok(removed)
}

pub async fn list_materials(state: &AppState) -> Arc<Vec<Material>> {
    state.materials.read().await.list()
}

pub async fn expired_materials(state: &AppState, as_of: NaiveDate) -> Vec<Material> {
    state.materials.read().await.expired_as_of(as_of)
}
