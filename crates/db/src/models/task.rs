//! Task entity model and DTOs.

use chrono::NaiveDate;
use fibertrack_core::status::{Priority, TaskStatus, TaskType};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::merge;

/// A unit of work, linked to a project by `project` (the project's id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    /// Id of the owning project. Not enforced: the project may be gone.
    pub project: EntityId,
    #[serde(default)]
    pub project_name: String,
    pub deadline: NaiveDate,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub created_at: Timestamp,
}

impl_record!(Task, "task");

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `new` if omitted.
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[validate(length(min = 1))]
    pub project: EntityId,
    #[serde(default)]
    pub project_name: String,
    pub deadline: NaiveDate,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

impl CreateTask {
    pub fn into_task(self, id: EntityId, created_at: Timestamp) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or(TaskStatus::New),
            priority: self.priority,
            assignee: self.assignee,
            project: self.project,
            project_name: self.project_name,
            deadline: self.deadline,
            task_type: self.task_type,
            created_at,
        }
    }
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    /// Must already be resolved to a project id by the caller.
    #[validate(length(min = 1))]
    pub project: Option<EntityId>,
    pub project_name: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
}

impl UpdateTask {
    /// Patch that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(self, task: &mut Task) {
        merge(&mut task.title, self.title);
        merge(&mut task.description, self.description);
        merge(&mut task.status, self.status);
        merge(&mut task.priority, self.priority);
        merge(&mut task.assignee, self.assignee);
        merge(&mut task.project, self.project);
        merge(&mut task.project_name, self.project_name);
        merge(&mut task.deadline, self.deadline);
        merge(&mut task.task_type, self.task_type);
    }
}
