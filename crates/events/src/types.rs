//! Event type names and entity kinds published by the application layer.

use serde::{Deserialize, Serialize};

/// The container an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Project,
    Task,
    Document,
    Employee,
    Material,
    Equipment,
    StockItem,
    Chart,
    Report,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Project => "project",
            EntityKind::Task => "task",
            EntityKind::Document => "document",
            EntityKind::Employee => "employee",
            EntityKind::Material => "material",
            EntityKind::Equipment => "equipment",
            EntityKind::StockItem => "stock_item",
            EntityKind::Chart => "chart",
            EntityKind::Report => "report",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const AUTH_REGISTERED: &str = "auth.registered";
pub const AUTH_LOGGED_IN: &str = "auth.logged_in";
pub const AUTH_LOGGED_OUT: &str = "auth.logged_out";

pub const PROJECT_CREATED: &str = "project.created";
pub const PROJECT_UPDATED: &str = "project.updated";
pub const PROJECT_REMOVED: &str = "project.removed";

pub const TASK_CREATED: &str = "task.created";
pub const TASK_UPDATED: &str = "task.updated";
pub const TASK_REMOVED: &str = "task.removed";

pub const DOCUMENT_CREATED: &str = "document.created";
pub const DOCUMENT_UPDATED: &str = "document.updated";
pub const DOCUMENT_REMOVED: &str = "document.removed";

pub const EMPLOYEE_CREATED: &str = "employee.created";
pub const EMPLOYEE_UPDATED: &str = "employee.updated";
pub const EMPLOYEE_REMOVED: &str = "employee.removed";

pub const MATERIAL_CREATED: &str = "material.created";
pub const MATERIAL_UPDATED: &str = "material.updated";
pub const MATERIAL_REMOVED: &str = "material.removed";

pub const EQUIPMENT_CREATED: &str = "equipment.created";
pub const EQUIPMENT_UPDATED: &str = "equipment.updated";
pub const EQUIPMENT_REMOVED: &str = "equipment.removed";
pub const EQUIPMENT_VERIFIED: &str = "equipment.verified";

pub const STOCK_CREATED: &str = "stock.created";
pub const STOCK_UPDATED: &str = "stock.updated";
pub const STOCK_REMOVED: &str = "stock.removed";

pub const METRICS_UPDATED: &str = "analytics.metrics_updated";
pub const CHART_UPDATED: &str = "analytics.chart_updated";
pub const REPORT_GENERATED: &str = "report.generated";
pub const REPORT_REMOVED: &str = "report.removed";
