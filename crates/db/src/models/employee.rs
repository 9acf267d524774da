//! Employee entity model and DTOs.

use fibertrack_core::roles::{Department, UserRole};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::merge;

/// A staff member. `subordinates` references other employees by id and may
/// form any graph; nothing checks for cycles or dangling ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    pub role: UserRole,
    pub department: Department,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subordinates: Vec<EntityId>,
    pub created_at: Timestamp,
}

impl_record!(Employee, "employee");

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[validate(length(min = 1))]
    pub name: String,
    pub role: UserRole,
    pub department: Department,
    #[serde(default)]
    pub position: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subordinates: Vec<EntityId>,
}

impl CreateEmployee {
    pub fn into_employee(self, id: EntityId, created_at: Timestamp) -> Employee {
        Employee {
            id,
            name: self.name,
            role: self.role,
            department: self.department,
            position: self.position,
            email: self.email,
            phone: self.phone,
            subordinates: self.subordinates,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<Department>,
    pub position: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subordinates: Option<Vec<EntityId>>,
}

impl UpdateEmployee {
    pub fn apply(self, employee: &mut Employee) {
        merge(&mut employee.name, self.name);
        merge(&mut employee.role, self.role);
        merge(&mut employee.department, self.department);
        merge(&mut employee.position, self.position);
        merge(&mut employee.email, self.email);
        merge(&mut employee.phone, self.phone);
        merge(&mut employee.subordinates, self.subordinates);
    }
}
