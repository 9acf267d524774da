//! Warehouse stock commands.

use std::sync::Arc;

use fibertrack_core::status::StockStatus;
use fibertrack_db::models::inventory::{CreateStockItem, StockItem, UpdateStockItem};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn create_stock_item(
    state: &AppState,
    session: &Session,
    input: CreateStockItem,
) -> AppResult<StockItem> {
    state.authorize(session).await?;
    let item = state.inventory.write().await.add(input)?;
    publish_change(state, session, event_types::STOCK_CREATED, EntityKind::StockItem, &item.id, &item);
    Ok(item)
}

pub async fn update_stock_item(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateStockItem,
) -> AppResult<Option<StockItem>> {
    state.authorize(session).await?;
    let updated = state.inventory.write().await.update(id, input)?;
    if let Some(item) = &updated {
        if item.is_low() {
            tracing::warn!(item_id = %item.id, quantity = item.quantity, "Stock below minimum");
        }
        publish_change(state, session, event_types::STOCK_UPDATED, EntityKind::StockItem, id, item);
    }
    Ok(updated)
}

pub async fn remove_stock_item(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<StockItem>> {
    state.authorize(session).await?;
    let removed = state.inventory.write().await.remove(id);
    if let Some(item) = &removed {
        publish_change(state, session, event_types::STOCK_REMOVED, EntityKind::StockItem, id, item);
    }
    Ok(removed)
}

pub async fn list_stock(state: &AppState) -> Arc<Vec<StockItem>> {
    state.inventory.read().await.list()
}

pub async fn stock_by_status(state: &AppState, status: StockStatus) -> Vec<StockItem> {
    state.inventory.read().await.by_status(status)
}

pub async fn low_stock(state: &AppState) -> Vec<StockItem> {
    state.inventory.read().await.low_stock()
}
