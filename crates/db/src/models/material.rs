//! Construction material model and DTOs.

use chrono::NaiveDate;
use fibertrack_core::error::CoreError;
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{merge, merge_opt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    /// Free-form category, e.g. "cable" or "splice closure".
    #[serde(rename = "type", default)]
    pub material_type: String,
    pub production_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub specifications: String,
    pub created_at: Timestamp,
}

impl_record!(Material, "material");

impl Material {
    /// Expiry, when set, may not precede production.
    pub fn check_dates(&self) -> Result<(), CoreError> {
        check_dates(self.production_date, self.expiry_date)
    }

    /// True once the expiry date has been reached.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry <= as_of)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterial {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(rename = "type", default)]
    pub material_type: String,
    pub production_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub specifications: String,
}

impl CreateMaterial {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        check_dates(self.production_date, self.expiry_date)
    }

    pub fn into_material(self, id: EntityId, created_at: Timestamp) -> Material {
        Material {
            id,
            name: self.name,
            manufacturer: self.manufacturer,
            material_type: self.material_type,
            production_date: self.production_date,
            expiry_date: self.expiry_date,
            specifications: self.specifications,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterial {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub specifications: Option<String>,
}

impl UpdateMaterial {
    pub fn apply(self, material: &mut Material) {
        merge(&mut material.name, self.name);
        merge(&mut material.manufacturer, self.manufacturer);
        merge(&mut material.material_type, self.material_type);
        merge(&mut material.production_date, self.production_date);
        merge_opt(&mut material.expiry_date, self.expiry_date);
        merge(&mut material.specifications, self.specifications);
    }
}

fn check_dates(production: NaiveDate, expiry: Option<NaiveDate>) -> Result<(), CoreError> {
    match expiry {
        Some(expiry) if expiry < production => Err(CoreError::Validation(
            "expiryDate must not precede productionDate".into(),
        )),
        _ => Ok(()),
    }
}
