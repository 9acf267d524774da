//! Warehouse stock items.

use fibertrack_core::error::CoreError;
use fibertrack_core::status::{StockItemType, StockStatus};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::merge;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub item_type: StockItemType,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    pub status: StockStatus,
    #[serde(default)]
    pub location: String,
    pub quantity: f64,
    /// Unit of measure, e.g. "m" or "pcs".
    pub unit: String,
    pub min_quantity: f64,
    pub max_quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl_record!(StockItem, "stock_item");

impl StockItem {
    pub fn is_low(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItem {
    #[serde(rename = "type")]
    pub item_type: StockItemType,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    /// Defaults to `available` if omitted.
    pub status: Option<StockStatus>,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub unit: String,
    #[validate(range(min = 0.0))]
    pub min_quantity: f64,
    #[validate(range(min = 0.0))]
    pub max_quantity: f64,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub notes: String,
}

impl CreateStockItem {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        check_bounds(self.min_quantity, self.max_quantity)
    }

    pub fn into_stock_item(self, id: EntityId, created_at: Timestamp) -> StockItem {
        StockItem {
            id,
            item_type: self.item_type,
            name: self.name,
            code: self.code,
            manufacturer: self.manufacturer,
            model: self.model,
            status: self.status.unwrap_or(StockStatus::Available),
            location: self.location,
            quantity: self.quantity,
            unit: self.unit,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            price: self.price,
            notes: self.notes,
            created_at,
            updated_at: created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockItem {
    #[serde(rename = "type")]
    pub item_type: Option<StockItemType>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub status: Option<StockStatus>,
    pub location: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub min_quantity: Option<f64>,
    pub max_quantity: Option<f64>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

impl UpdateStockItem {
    pub fn check(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("quantity", self.quantity),
            ("minQuantity", self.min_quantity),
            ("maxQuantity", self.max_quantity),
            ("price", self.price),
        ] {
            if value.is_some_and(|v| v < 0.0) {
                return Err(CoreError::Validation(format!("{field} must not be negative")));
            }
        }
        Ok(())
    }

    /// Merge into `item` and stamp `updated_at`.
    pub fn apply(self, item: &mut StockItem, updated_at: Timestamp) {
        merge(&mut item.item_type, self.item_type);
        merge(&mut item.name, self.name);
        merge(&mut item.code, self.code);
        merge(&mut item.manufacturer, self.manufacturer);
        merge(&mut item.model, self.model);
        merge(&mut item.status, self.status);
        merge(&mut item.location, self.location);
        merge(&mut item.quantity, self.quantity);
        merge(&mut item.unit, self.unit);
        merge(&mut item.min_quantity, self.min_quantity);
        merge(&mut item.max_quantity, self.max_quantity);
        merge(&mut item.price, self.price);
        merge(&mut item.notes, self.notes);
        item.updated_at = updated_at;
    }
}

fn check_bounds(min: f64, max: f64) -> Result<(), CoreError> {
    if min > max {
        return Err(CoreError::Validation(format!(
            "minQuantity ({min}) must not exceed maxQuantity ({max})"
        )));
    }
    Ok(())
}
