//! Container for projects.

use std::sync::Arc;

use fibertrack_core::analytics::is_active;
use fibertrack_core::error::CoreError;
use fibertrack_core::status::{WorkflowPhase, WorkflowStatus};
use fibertrack_core::types::{new_id, now, EntityId};

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::Collection;

/// Provides CRUD operations and status views over projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectRepo {
    rows: Collection<Project>,
}

impl ProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a new project, assigning its id and creation time.
    pub fn add(&mut self, input: CreateProject) -> Result<Project, CoreError> {
        input.check()?;
        let project = input.into_project(new_id(), now());
        self.rows.insert(project.clone())?;
        tracing::info!(project_id = %project.id, code = %project.code, "Project created");
        Ok(project)
    }

    /// Insert a fully formed record (seed data, imports).
    pub fn insert(&mut self, project: Project) -> Result<(), CoreError> {
        self.rows.insert(project)
    }

    /// Shallow-merge `input` into the project. `Ok(None)` if `id` is absent.
    pub fn update(
        &mut self,
        id: &str,
        input: UpdateProject,
    ) -> Result<Option<Project>, CoreError> {
        input.check()?;
        Ok(self.rows.update_with(id, move |project| input.apply(project)))
    }

    /// Remove a project. Tasks and documents referring to it are left alone.
    pub fn remove(&mut self, id: &str) -> Option<Project> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            tracing::info!(project_id = %id, "Project removed");
        }
        removed
    }

    pub fn list(&self) -> Arc<Vec<Project>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.rows.get(id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Project> {
        self.rows.iter().find(|p| p.code == code)
    }

    /// Resolve a project id or project code to the project id.
    ///
    /// Ids take precedence when a value is both an id and some project's code.
    pub fn resolve_key(&self, key: &str) -> Option<EntityId> {
        self.find(key)
            .or_else(|| self.find_by_code(key))
            .map(|p| p.id.clone())
    }

    /// Projects whose `phase` is currently at `status`.
    pub fn filter_by_status(&self, phase: WorkflowPhase, status: WorkflowStatus) -> Vec<Project> {
        self.rows.filter(|p| p.status(phase) == status)
    }

    /// Projects where neither workflow phase is completed.
    pub fn active(&self) -> Vec<Project> {
        self.rows
            .filter(|p| is_active(p.design_status, p.installation_status))
    }
}
