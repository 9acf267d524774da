//! Measuring/installation equipment and its verification history.

use chrono::NaiveDate;
use fibertrack_core::status::VerificationType;
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::merge;

/// A calibration, maintenance or inspection record owned by one equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub id: EntityId,
    pub equipment_id: EntityId,
    #[serde(rename = "type")]
    pub verification_type: VerificationType,
    pub date: NaiveDate,
    /// When the next check of this kind is due.
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub equipment_type: String,
    pub serial_number: String,
    #[serde(default)]
    pub verifications: Vec<Verification>,
    pub created_at: Timestamp,
}

impl_record!(Equipment, "equipment");

impl Equipment {
    /// The most recent verification by date, if any.
    pub fn latest_verification(&self) -> Option<&Verification> {
        self.verifications.iter().max_by_key(|v| v.date)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type", default)]
    pub equipment_type: String,
    #[validate(length(min = 1))]
    pub serial_number: String,
}

impl CreateEquipment {
    pub fn into_equipment(self, id: EntityId, created_at: Timestamp) -> Equipment {
        Equipment {
            id,
            name: self.name,
            equipment_type: self.equipment_type,
            serial_number: self.serial_number,
            verifications: Vec::new(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub serial_number: Option<String>,
}

impl UpdateEquipment {
    pub fn apply(self, equipment: &mut Equipment) {
        merge(&mut equipment.name, self.name);
        merge(&mut equipment.equipment_type, self.equipment_type);
        merge(&mut equipment.serial_number, self.serial_number);
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVerification {
    #[serde(rename = "type")]
    pub verification_type: VerificationType,
    pub date: NaiveDate,
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl CreateVerification {
    pub fn into_verification(
        self,
        id: EntityId,
        equipment_id: EntityId,
        created_at: Timestamp,
    ) -> Verification {
        Verification {
            id,
            equipment_id,
            verification_type: self.verification_type,
            date: self.date,
            next_date: self.next_date,
            notes: self.notes,
            created_at,
        }
    }
}
