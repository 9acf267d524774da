//! Entity models and their create/update DTOs.
//!
//! Update DTOs carry `Option` fields; applying one is a shallow merge where
//! every `Some` overwrites the stored value and every `None` keeps it.

/// Implement [`Record`](crate::repositories::Record) for a model with an `id: EntityId` field.
macro_rules! impl_record {
    ($model:ty, $entity:literal) => {
        impl $crate::repositories::Record for $model {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

pub mod document;
pub mod employee;
pub mod equipment;
pub mod inventory;
pub mod material;
pub mod project;
pub mod task;
pub mod user;

/// Overwrite `slot` when the patch carries a value.
pub(crate) fn merge<T>(slot: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *slot = value;
    }
}

/// Like [`merge`], for fields that are themselves optional.
pub(crate) fn merge_opt<T>(slot: &mut Option<T>, patch: Option<T>) {
    if patch.is_some() {
        *slot = patch;
    }
}
