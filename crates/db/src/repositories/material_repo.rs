//! Container for construction materials.

use std::sync::Arc;

use chrono::NaiveDate;
use fibertrack_core::error::CoreError;
use fibertrack_core::types::{new_id, now};
use validator::Validate;

use crate::models::material::{CreateMaterial, Material, UpdateMaterial};
use crate::repositories::Collection;

#[derive(Debug, Clone, Default)]
pub struct MaterialRepo {
    rows: Collection<Material>,
}

impl MaterialRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateMaterial) -> Result<Material, CoreError> {
        input.check()?;
        let material = input.into_material(new_id(), now());
        self.rows.insert(material.clone())?;
        tracing::info!(material_id = %material.id, name = %material.name, "Material created");
        Ok(material)
    }

    pub fn insert(&mut self, material: Material) -> Result<(), CoreError> {
        self.rows.insert(material)
    }

    /// Patch a material. The merged dates are checked before anything is stored.
    pub fn update(
        &mut self,
        id: &str,
        input: UpdateMaterial,
    ) -> Result<Option<Material>, CoreError> {
        input.validate()?;
        self.rows.try_update_with(id, move |material| {
            input.apply(material);
            material.check_dates()
        })
    }

    pub fn remove(&mut self, id: &str) -> Option<Material> {
        self.rows.remove(id)
    }

    pub fn list(&self) -> Arc<Vec<Material>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Material> {
        self.rows.get(id)
    }

    /// Materials whose expiry date is on or before `as_of`.
    pub fn expired_as_of(&self, as_of: NaiveDate) -> Vec<Material> {
        self.rows.filter(|m| m.is_expired(as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, expiry: Option<NaiveDate>) -> CreateMaterial {
        CreateMaterial {
            name: name.into(),
            manufacturer: "Optiken".into(),
            material_type: "cable".into(),
            production_date: date(2024, 1, 1),
            expiry_date: expiry,
            specifications: String::new(),
        }
    }

    #[test]
    fn expiry_filter_includes_boundary_day() {
        let mut repo = MaterialRepo::new();
        repo.add(input("Sleeve", Some(date(2025, 6, 1)))).unwrap();
        repo.add(input("Cable", None)).unwrap();
        repo.add(input("Gel", Some(date(2026, 1, 1)))).unwrap();

        assert_eq!(repo.expired_as_of(date(2025, 5, 31)).len(), 0);
        let expired = repo.expired_as_of(date(2025, 6, 1));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Sleeve");
    }

    #[test]
    fn expiry_before_production_rejected() {
        let mut repo = MaterialRepo::new();
        let err = repo.add(input("Broken", Some(date(2023, 1, 1)))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn patch_moving_expiry_before_production_is_rejected() {
        let mut repo = MaterialRepo::new();
        let sleeve = repo.add(input("Sleeve", Some(date(2025, 6, 1)))).unwrap();

        let err = repo
            .update(&sleeve.id, UpdateMaterial {
                expiry_date: Some(date(2023, 12, 31)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(repo.find(&sleeve.id).unwrap().expiry_date, Some(date(2025, 6, 1)));

        // Production moved past the stored expiry is caught on the merged row.
        let err = repo
            .update(&sleeve.id, UpdateMaterial {
                production_date: Some(date(2025, 7, 1)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let moved = repo
            .update(&sleeve.id, UpdateMaterial {
                expiry_date: Some(date(2027, 1, 1)),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(moved.expiry_date, Some(date(2027, 1, 1)));
        assert_eq!(repo.update("missing", UpdateMaterial::default()).unwrap(), None);
    }
}
