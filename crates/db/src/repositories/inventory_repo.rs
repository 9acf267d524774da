//! Container for warehouse stock.

use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_core::status::StockStatus;
use fibertrack_core::types::{new_id, now};

use crate::models::inventory::{CreateStockItem, StockItem, UpdateStockItem};
use crate::repositories::Collection;

#[derive(Debug, Clone, Default)]
pub struct InventoryRepo {
    rows: Collection<StockItem>,
}

impl InventoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateStockItem) -> Result<StockItem, CoreError> {
        input.check()?;
        let item = input.into_stock_item(new_id(), now());
        self.rows.insert(item.clone())?;
        tracing::info!(item_id = %item.id, code = %item.code, quantity = item.quantity, "Stock item added");
        Ok(item)
    }

    pub fn insert(&mut self, item: StockItem) -> Result<(), CoreError> {
        self.rows.insert(item)
    }

    /// Patch an item and stamp `updated_at`. `Ok(None)` for an unknown id.
    pub fn update(
        &mut self,
        id: &str,
        input: UpdateStockItem,
    ) -> Result<Option<StockItem>, CoreError> {
        input.check()?;
        let stamp = now();
        let updated = self.rows.update_with(id, move |item| input.apply(item, stamp));
        if let Some(item) = &updated {
            if item.min_quantity > item.max_quantity {
                tracing::warn!(item_id = %item.id, "Stock item bounds inverted after update");
            }
        }
        Ok(updated)
    }

    pub fn remove(&mut self, id: &str) -> Option<StockItem> {
        self.rows.remove(id)
    }

    pub fn list(&self) -> Arc<Vec<StockItem>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&StockItem> {
        self.rows.get(id)
    }

    pub fn by_status(&self, status: StockStatus) -> Vec<StockItem> {
        self.rows.filter(|i| i.status == status)
    }

    /// Items whose quantity has fallen below their minimum.
    pub fn low_stock(&self) -> Vec<StockItem> {
        self.rows.filter(StockItem::is_low)
    }
}
