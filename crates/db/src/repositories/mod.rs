//! In-memory containers, one per entity type.
//!
//! Each container wraps a copy-on-write [`Collection`]. Updates and removals
//! of an absent id are silent no-ops that leave the collection untouched.

pub mod collection;
pub mod document_repo;
pub mod employee_repo;
pub mod equipment_repo;
pub mod inventory_repo;
pub mod material_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use collection::{Collection, Record};
pub use document_repo::DocumentRepo;
pub use employee_repo::EmployeeRepo;
pub use equipment_repo::EquipmentRepo;
pub use inventory_repo::InventoryRepo;
pub use material_repo::MaterialRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
