//! Container for measuring equipment and its verification history.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use fibertrack_core::error::CoreError;
use fibertrack_core::status::VerificationType;
use fibertrack_core::types::{new_id, now};
use validator::Validate;

use crate::models::equipment::{
    CreateEquipment, CreateVerification, Equipment, UpdateEquipment, Verification,
};
use crate::repositories::Collection;

#[derive(Debug, Clone, Default)]
pub struct EquipmentRepo {
    rows: Collection<Equipment>,
}

impl EquipmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateEquipment) -> Result<Equipment, CoreError> {
        input.validate()?;
        if self
            .rows
            .iter()
            .any(|e| e.serial_number == input.serial_number)
        {
            return Err(CoreError::Conflict(format!(
                "equipment with serial number {} already exists",
                input.serial_number
            )));
        }
        let equipment = input.into_equipment(new_id(), now());
        self.rows.insert(equipment.clone())?;
        tracing::info!(
            equipment_id = %equipment.id,
            serial_number = %equipment.serial_number,
            "Equipment registered",
        );
        Ok(equipment)
    }

    pub fn insert(&mut self, equipment: Equipment) -> Result<(), CoreError> {
        self.rows.insert(equipment)
    }

    pub fn update(&mut self, id: &str, input: UpdateEquipment) -> Option<Equipment> {
        self.rows.update_with(id, move |equipment| input.apply(equipment))
    }

    pub fn remove(&mut self, id: &str) -> Option<Equipment> {
        self.rows.remove(id)
    }

    pub fn list(&self) -> Arc<Vec<Equipment>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Equipment> {
        self.rows.get(id)
    }

    /// Append a verification record. Returns `None` for an unknown equipment id.
    pub fn add_verification(
        &mut self,
        equipment_id: &str,
        input: CreateVerification,
    ) -> Option<Verification> {
        let verification = input.into_verification(new_id(), equipment_id.to_string(), now());
        let recorded = verification.clone();
        self.rows
            .update_with(equipment_id, move |equipment| {
                equipment.verifications.push(verification)
            })
            .map(|_| {
                tracing::info!(
                    equipment_id = %equipment_id,
                    verification_type = %recorded.verification_type,
                    "Verification recorded",
                );
                recorded
            })
    }

    /// Equipment with at least one verification type whose most recent
    /// record has a `next_date` on or before `as_of`.
    pub fn verifications_due(&self, as_of: NaiveDate) -> Vec<Equipment> {
        self.rows.filter(|equipment| {
            let mut latest: HashMap<VerificationType, &Verification> = HashMap::new();
            for v in &equipment.verifications {
                latest
                    .entry(v.verification_type)
                    .and_modify(|cur| {
                        if v.date >= cur.date {
                            *cur = v;
                        }
                    })
                    .or_insert(v);
            }
            latest
                .values()
                .any(|v| v.next_date.is_some_and(|next| next <= as_of))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reflectometer(serial: &str) -> CreateEquipment {
        CreateEquipment {
            name: "OTDR".into(),
            equipment_type: "reflectometer".into(),
            serial_number: serial.into(),
        }
    }

    fn calibration(on: NaiveDate, next: NaiveDate) -> CreateVerification {
        CreateVerification {
            verification_type: VerificationType::Calibration,
            date: on,
            next_date: Some(next),
            notes: String::new(),
        }
    }

    #[test]
    fn verification_for_unknown_equipment_is_noop() {
        let mut repo = EquipmentRepo::new();
        let result = repo.add_verification("missing", calibration(date(2024, 1, 1), date(2025, 1, 1)));
        assert!(result.is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn only_latest_record_per_type_counts_toward_due() {
        let mut repo = EquipmentRepo::new();
        let otdr = repo.add(reflectometer("SN-1")).unwrap();
        repo.add_verification(&otdr.id, calibration(date(2023, 1, 1), date(2024, 1, 1)))
            .unwrap();
        assert_eq!(repo.verifications_due(date(2024, 6, 1)).len(), 1);

        let v = repo
            .add_verification(&otdr.id, calibration(date(2024, 1, 5), date(2025, 1, 5)))
            .unwrap();
        assert_eq!(v.equipment_id, otdr.id);
        assert!(repo.verifications_due(date(2024, 6, 1)).is_empty());
        assert_eq!(repo.find(&otdr.id).unwrap().verifications.len(), 2);
    }

    #[test]
    fn duplicate_serial_rejected() {
        let mut repo = EquipmentRepo::new();
        repo.add(reflectometer("SN-1")).unwrap();
        let err = repo.add(reflectometer("SN-1")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }
}
