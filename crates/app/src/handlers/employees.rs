//! Employee commands.

use std::sync::Arc;

use fibertrack_core::roles::{Department, UserRole};
use fibertrack_db::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn create_employee(
    state: &AppState,
    session: &Session,
    input: CreateEmployee,
) -> AppResult<Employee> {
    state.authorize(session).await?;
    let employee = state.employees.write().await.add(input)?;
    publish_change(
        state,
        session,
        event_types::EMPLOYEE_CREATED,
        EntityKind::Employee,
        &employee.id,
        &employee,
    );
    Ok(employee)
}

pub async fn update_employee(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateEmployee,
) -> AppResult<Option<Employee>> {
    state.authorize(session).await?;
    let updated = state.employees.write().await.update(id, input)?;
    if let Some(employee) = &updated {
        publish_change(state, session, event_types::EMPLOYEE_UPDATED, EntityKind::Employee, id, employee);
    }
    Ok(updated)
}

pub async fn remove_employee(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Employee>> {
    state.authorize(session).await?;
    let removed = state.employees.write().await.remove(id);
    if let Some(employee) = &removed {
        publish_change(state, session, event_types::EMPLOYEE_REMOVED, EntityKind::Employee, id, employee);
    }
    Ok(removed)
}

pub async fn list_employees(state: &AppState) -> Arc<Vec<Employee>> {
    state.employees.read().await.list()
}

pub async fn employees_by_role(state: &AppState, role: UserRole) -> Vec<Employee> {
    state.employees.read().await.by_role(role)
}

pub async fn employees_by_department(state: &AppState, department: Department) -> Vec<Employee> {
    state.employees.read().await.by_department(department)
}

pub async fn subordinates(state: &AppState, id: &str) -> Vec<Employee> {
    state.employees.read().await.subordinates_of(id)
}
