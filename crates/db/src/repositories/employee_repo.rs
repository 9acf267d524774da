//! Container for employees.

use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_core::roles::{Department, UserRole};
use fibertrack_core::types::{new_id, now};
use validator::Validate;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use crate::repositories::Collection;

#[derive(Debug, Clone, Default)]
pub struct EmployeeRepo {
    rows: Collection<Employee>,
}

impl EmployeeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateEmployee) -> Result<Employee, CoreError> {
        input.validate()?;
        let employee = input.into_employee(new_id(), now());
        self.rows.insert(employee.clone())?;
        tracing::info!(employee_id = %employee.id, role = %employee.role, "Employee created");
        Ok(employee)
    }

    pub fn insert(&mut self, employee: Employee) -> Result<(), CoreError> {
        self.rows.insert(employee)
    }

    pub fn update(
        &mut self,
        id: &str,
        input: UpdateEmployee,
    ) -> Result<Option<Employee>, CoreError> {
        input.validate()?;
        Ok(self.rows.update_with(id, move |employee| input.apply(employee)))
    }

    /// Remove an employee. Other employees may still list the id as a subordinate.
    pub fn remove(&mut self, id: &str) -> Option<Employee> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            tracing::info!(employee_id = %id, "Employee removed");
        }
        removed
    }

    pub fn list(&self) -> Arc<Vec<Employee>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.rows.get(id)
    }

    pub fn by_role(&self, role: UserRole) -> Vec<Employee> {
        self.rows.filter(|e| e.role == role)
    }

    pub fn by_department(&self, department: Department) -> Vec<Employee> {
        self.rows.filter(|e| e.department == department)
    }

    /// Direct subordinates of `id`, resolved to records. Dangling ids are skipped.
    pub fn subordinates_of(&self, id: &str) -> Vec<Employee> {
        let Some(manager) = self.find(id) else {
            return Vec::new();
        };
        manager
            .subordinates
            .iter()
            .filter_map(|sub| self.find(sub).cloned())
            .collect()
    }
}
