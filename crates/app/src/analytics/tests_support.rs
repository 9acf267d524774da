//! Record builders shared by the analytics unit tests.

use chrono::{NaiveDate, TimeZone, Utc};
use fibertrack_core::roles::{Department, UserRole};
use fibertrack_core::status::{Priority, TaskStatus, TaskType, WorkflowStatus};
use fibertrack_core::types::{new_id, now, Timestamp};
use fibertrack_db::models::employee::Employee;
use fibertrack_db::models::project::{CreateProject, Project};
use fibertrack_db::models::task::Task;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn project(design: WorkflowStatus, installation: WorkflowStatus) -> Project {
    let mut input = CreateProject::new("P-1", "Customer", "Line", day(2025, 1, 1));
    input.design_status = Some(design);
    input.installation_status = Some(installation);
    input.into_project(new_id(), now())
}

pub fn task(status: TaskStatus) -> Task {
    task_created(status, now())
}

pub fn task_created(status: TaskStatus, created_at: Timestamp) -> Task {
    Task {
        id: new_id(),
        title: "Route survey".into(),
        description: String::new(),
        status,
        priority: Priority::Medium,
        assignee: String::new(),
        project: "p1".into(),
        project_name: String::new(),
        deadline: day(2025, 1, 1),
        task_type: TaskType::Rd,
        created_at,
    }
}

pub fn employee(role: UserRole) -> Employee {
    Employee {
        id: new_id(),
        name: "Staff".into(),
        role,
        department: Department::Engineering,
        position: String::new(),
        email: String::new(),
        phone: String::new(),
        subordinates: Vec::new(),
        created_at: now(),
    }
}
