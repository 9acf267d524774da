//! Demo records loaded at boot when `SEED_DEMO_DATA` is enabled.
//!
//! Records carry fixed ids so they can be referenced across containers.
//! Seeding bypasses sessions and publishes no events.

use chrono::{NaiveDate, NaiveTime};
use fibertrack_core::roles::{AccessLevel, Department, UserRole};
use fibertrack_core::status::{
    Priority, ProjectType, StockItemType, StockStatus, TaskStatus, TaskType, VerificationType,
    WorkflowStatus,
};
use fibertrack_core::types::{now, Timestamp};
use fibertrack_db::models::employee::Employee;
use fibertrack_db::models::equipment::{Equipment, Verification};
use fibertrack_db::models::inventory::StockItem;
use fibertrack_db::models::material::Material;
use fibertrack_db::models::project::{Project, ProjectStage};
use fibertrack_db::models::task::Task;
use fibertrack_db::models::user::User;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Fill empty containers with demo data and make sure an admin exists.
///
/// Containers that already hold rows are left alone.
pub async fn load_demo_data(state: &AppState) -> AppResult<()> {
    ensure_admin(state).await?;

    {
        let mut projects = state.projects.write().await;
        if projects.is_empty() {
            for project in demo_projects()? {
                projects.insert(project)?;
            }
        }
    }
    {
        let mut tasks = state.tasks.write().await;
        if tasks.is_empty() {
            for task in demo_tasks()? {
                tasks.insert(task)?;
            }
        }
    }
    {
        let mut employees = state.employees.write().await;
        if employees.is_empty() {
            for employee in demo_employees()? {
                employees.insert(employee)?;
            }
        }
    }
    {
        let mut materials = state.materials.write().await;
        if materials.is_empty() {
            for material in demo_materials()? {
                materials.insert(material)?;
            }
        }
    }
    {
        let mut equipment = state.equipment.write().await;
        if equipment.is_empty() {
            for item in demo_equipment()? {
                equipment.insert(item)?;
            }
        }
    }
    {
        let mut inventory = state.inventory.write().await;
        if inventory.is_empty() {
            for item in demo_inventory()? {
                inventory.insert(item)?;
            }
        }
    }

    tracing::info!("Demo data loaded");
    Ok(())
}

/// Add the `admin` user when the directory is empty.
pub async fn ensure_admin(state: &AppState) -> AppResult<()> {
    let mut users = state.users.write().await;
    if !users.is_empty() {
        return Ok(());
    }
    let password = state.config.credential_scheme.store(ADMIN_PASSWORD)?;
    users.insert(User {
        id: "1".into(),
        username: ADMIN_USERNAME.into(),
        name: "Administrator".into(),
        email: "admin@example.com".into(),
        phone: "+7 (999) 999-99-99".into(),
        role: UserRole::Director,
        access_level: AccessLevel::Admin,
        department: Department::Management,
        position: "Director".into(),
        password,
        created_at: now(),
    })?;
    tracing::info!("Default admin user created");
    Ok(())
}

fn date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|e| AppError::Internal(format!("bad seed date '{raw}': {e}")))
}

fn stamp(raw: &str) -> AppResult<Timestamp> {
    Ok(date(raw)?.and_time(NaiveTime::MIN).and_utc())
}

fn stage(
    id: &str,
    name: &str,
    start: &str,
    end: &str,
    status: WorkflowStatus,
    completion_percentage: u8,
) -> AppResult<ProjectStage> {
    Ok(ProjectStage {
        id: id.into(),
        name: name.into(),
        start_date: date(start)?,
        end_date: date(end)?,
        status,
        completion_percentage,
    })
}

fn demo_projects() -> AppResult<Vec<Project>> {
    Ok(vec![
        Project {
            id: "proj-001".into(),
            project_type: ProjectType::B2b,
            customer: "TechnoSvyaz LLC".into(),
            name: "Moscow to Kazan trunk line".into(),
            deadline: date("2024-12-31")?,
            priority: Priority::High,
            survey_act: true,
            code: "MSK-KZN-001".into(),
            assignee: "Ivanov I.I.".into(),
            start_date: Some(date("2024-01-15")?),
            stages: vec![
                stage("stage-001", "Design", "2024-01-15", "2024-02-15", WorkflowStatus::Completed, 100)?,
                stage("stage-002", "Construction", "2024-02-16", "2024-06-30", WorkflowStatus::InProgress, 45)?,
            ],
            design_status: WorkflowStatus::Approved,
            design_review_date: Some(date("2024-02-01")?),
            design_approval_date: Some(date("2024-02-10")?),
            design_comments: Some("Remarks resolved".into()),
            installation_status: WorkflowStatus::InProgress,
            installation_start_date: Some(date("2024-02-16")?),
            technical_conditions_status: "Approved".into(),
            chief_engineer_status: "Checked".into(),
            approval_status: "Approved".into(),
            customer_delivery_date: None,
            notes: "Priority project".into(),
            created_at: stamp("2024-01-10")?,
        },
        Project {
            id: "proj-002".into(),
            project_type: ProjectType::Government,
            customer: "Ministry of Communications".into(),
            name: "Connecting social facilities".into(),
            deadline: date("2024-09-30")?,
            priority: Priority::Medium,
            survey_act: true,
            code: "SOC-002".into(),
            assignee: "Petrov P.P.".into(),
            start_date: Some(date("2024-03-01")?),
            stages: vec![stage(
                "stage-003",
                "Site survey",
                "2024-03-01",
                "2024-03-15",
                WorkflowStatus::InProgress,
                60,
            )?],
            design_status: WorkflowStatus::InProgress,
            design_review_date: None,
            design_approval_date: None,
            design_comments: None,
            installation_status: WorkflowStatus::NotStarted,
            installation_start_date: None,
            technical_conditions_status: "Under review".into(),
            chief_engineer_status: "In progress".into(),
            approval_status: "Pending approval".into(),
            customer_delivery_date: None,
            notes: "Socially significant project".into(),
            created_at: stamp("2024-02-20")?,
        },
    ])
}

fn demo_tasks() -> AppResult<Vec<Task>> {
    Ok(vec![
        Task {
            id: "task-001".into(),
            title: "Draw the cable route".into(),
            description: "Lay out the fiber route over existing infrastructure".into(),
            status: TaskStatus::Completed,
            priority: Priority::High,
            assignee: "Ivanov I.I.".into(),
            project: "proj-001".into(),
            project_name: "Moscow to Kazan trunk line".into(),
            deadline: date("2024-02-01")?,
            task_type: TaskType::Rd,
            created_at: stamp("2024-01-15")?,
        },
        Task {
            id: "task-002".into(),
            title: "Survey the facilities".into(),
            description: "Inspect the social facilities to be connected".into(),
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            assignee: "Petrov P.P.".into(),
            project: "proj-002".into(),
            project_name: "Connecting social facilities".into(),
            deadline: date("2024-03-15")?,
            task_type: TaskType::Rd,
            created_at: stamp("2024-03-01")?,
        },
    ])
}

fn demo_employees() -> AppResult<Vec<Employee>> {
    let hired = stamp("2024-01-01")?;
    let employee = |id: &str,
                    name: &str,
                    role: UserRole,
                    department: Department,
                    position: &str,
                    email: &str,
                    phone: &str,
                    subordinates: &[&str]| Employee {
        id: id.into(),
        name: name.into(),
        role,
        department,
        position: position.into(),
        email: email.into(),
        phone: phone.into(),
        subordinates: subordinates.iter().map(|s| s.to_string()).collect(),
        created_at: hired,
    };
    Ok(vec![
        employee(
            "emp-001",
            "Ivan Ivanov",
            UserRole::Engineer,
            Department::Engineering,
            "Chief project engineer",
            "ivanov@example.com",
            "+7 (999) 123-45-67",
            &["emp-003"],
        ),
        employee(
            "emp-002",
            "Petr Petrov",
            UserRole::Engineer,
            Department::Engineering,
            "Design engineer",
            "petrov@example.com",
            "+7 (999) 234-56-78",
            &[],
        ),
        employee(
            "emp-003",
            "Sidor Sidorov",
            UserRole::Installer,
            Department::Installation,
            "Installation crew lead",
            "sidorov@example.com",
            "+7 (999) 345-67-89",
            &[],
        ),
    ])
}

fn demo_materials() -> AppResult<Vec<Material>> {
    Ok(vec![
        Material {
            id: "mat-001".into(),
            name: "Optical cable".into(),
            manufacturer: "KabelStroy".into(),
            material_type: "Cable".into(),
            production_date: date("2024-01-01")?,
            expiry_date: Some(date("2026-01-01")?),
            specifications: "Fibers: 32, type: SM".into(),
            created_at: stamp("2024-01-15")?,
        },
        Material {
            id: "mat-002".into(),
            name: "Splice closure".into(),
            manufacturer: "OptikPro".into(),
            material_type: "Closure".into(),
            production_date: date("2024-01-01")?,
            expiry_date: Some(date("2029-01-01")?),
            specifications: "Ports: 48".into(),
            created_at: stamp("2024-01-15")?,
        },
    ])
}

fn demo_equipment() -> AppResult<Vec<Equipment>> {
    Ok(vec![
        Equipment {
            id: "eq-001".into(),
            name: "Reflectometer".into(),
            equipment_type: "Measuring equipment".into(),
            serial_number: "OTDR-001".into(),
            verifications: vec![Verification {
                id: "ver-001".into(),
                equipment_id: "eq-001".into(),
                verification_type: VerificationType::Calibration,
                date: date("2024-01-01")?,
                next_date: Some(date("2025-01-01")?),
                notes: "Calibration done".into(),
                created_at: stamp("2024-01-01")?,
            }],
            created_at: stamp("2024-01-01")?,
        },
        Equipment {
            id: "eq-002".into(),
            name: "Fusion splicer".into(),
            equipment_type: "Installation equipment".into(),
            serial_number: "FSM-002".into(),
            verifications: vec![Verification {
                id: "ver-002".into(),
                equipment_id: "eq-002".into(),
                verification_type: VerificationType::Maintenance,
                date: date("2024-02-01")?,
                next_date: Some(date("2024-05-01")?),
                notes: "Maintenance done".into(),
                created_at: stamp("2024-02-01")?,
            }],
            created_at: stamp("2024-01-01")?,
        },
    ])
}

fn demo_inventory() -> AppResult<Vec<StockItem>> {
    let received = stamp("2024-01-01")?;
    Ok(vec![
        StockItem {
            id: "inv-001".into(),
            item_type: StockItemType::Cable,
            name: "Optical cable".into(),
            code: "CABLE-001".into(),
            manufacturer: "KabelStroy".into(),
            model: "OK-32".into(),
            status: StockStatus::Available,
            location: "Warehouse 1".into(),
            quantity: 5000.0,
            unit: "m".into(),
            min_quantity: 1000.0,
            max_quantity: 10000.0,
            price: 50.0,
            notes: "Main warehouse".into(),
            created_at: received,
            updated_at: received,
        },
        StockItem {
            id: "inv-002".into(),
            item_type: StockItemType::Equipment,
            name: "Splice closure".into(),
            code: "SPLICE-001".into(),
            manufacturer: "OptikPro".into(),
            model: "M-48".into(),
            status: StockStatus::Available,
            location: "Warehouse 2".into(),
            quantity: 50.0,
            unit: "pcs".into(),
            min_quantity: 10.0,
            max_quantity: 100.0,
            price: 2000.0,
            notes: "Reserve warehouse".into(),
            created_at: received,
            updated_at: received,
        },
    ])
}
