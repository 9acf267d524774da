//! Container for tasks.

use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_core::status::{TaskStatus, TaskType};
use fibertrack_core::types::{new_id, now};
use validator::Validate;

use crate::models::project::Project;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::repositories::Collection;

/// Provides CRUD operations and derived views over tasks.
///
/// `Task::project` holds the owning project's id. Nothing is cascaded when a
/// project is removed.
#[derive(Debug, Clone, Default)]
pub struct TaskRepo {
    rows: Collection<Task>,
}

impl TaskRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateTask) -> Result<Task, CoreError> {
        input.validate()?;
        let task = input.into_task(new_id(), now());
        self.rows.insert(task.clone())?;
        tracing::info!(task_id = %task.id, project = %task.project, task_type = %task.task_type, "Task created");
        Ok(task)
    }

    pub fn insert(&mut self, task: Task) -> Result<(), CoreError> {
        self.rows.insert(task)
    }

    /// Shallow-merge `input` into the task. `Ok(None)` if `id` is absent.
    pub fn update(&mut self, id: &str, input: UpdateTask) -> Result<Option<Task>, CoreError> {
        input.validate()?;
        Ok(self.rows.update_with(id, move |task| input.apply(task)))
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            tracing::info!(task_id = %id, "Task removed");
        }
        removed
    }

    pub fn list(&self) -> Arc<Vec<Task>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.rows.get(id)
    }

    pub fn by_project(&self, project_id: &str) -> Vec<Task> {
        self.rows.filter(|t| t.project == project_id)
    }

    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.rows.filter(|t| t.status == status)
    }

    pub fn by_assignee(&self, assignee: &str) -> Vec<Task> {
        self.rows.filter(|t| t.assignee == assignee)
    }

    pub fn by_type(&self, task_type: TaskType) -> Vec<Task> {
        self.rows.filter(|t| t.task_type == task_type)
    }

    /// Rewrite tasks that reference a project by code so they reference it by id.
    ///
    /// Older data keyed tasks by project code; this converts them in place.
    /// Returns the number of tasks rewritten.
    pub fn relink_project_codes(&mut self, projects: &[Project]) -> usize {
        let changed = self.rows.update_where(
            |task| {
                !projects.iter().any(|p| p.id == task.project)
                    && projects.iter().any(|p| p.code == task.project)
            },
            |task| {
                if let Some(project) = projects.iter().find(|p| p.code == task.project) {
                    task.project = project.id.clone();
                }
            },
        );
        if changed > 0 {
            tracing::info!(changed, "Relinked task project references from code to id");
        }
        changed
    }
}
