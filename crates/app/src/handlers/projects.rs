//! Project commands, including baseline task creation.

use std::sync::Arc;

use fibertrack_core::status::{WorkflowPhase, WorkflowStatus};
use fibertrack_db::models::project::{CreateProject, Project, UpdateProject};
use fibertrack_db::models::task::{CreateTask, Task};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

/// Phases that get a baseline task when a project is created.
const BASELINE_PHASES: [WorkflowPhase; 2] =
    [WorkflowPhase::DesignReview, WorkflowPhase::Installation];

/// Create a project and its baseline tasks.
///
/// One task per workflow phase is created with status `new`, linked by
/// project id and inheriting the project's assignee, priority and deadline.
pub async fn create_project(
    state: &AppState,
    session: &Session,
    input: CreateProject,
) -> AppResult<Project> {
    state.authorize(session).await?;

    let project = state.projects.write().await.add(input)?;
    publish_change(
        state,
        session,
        event_types::PROJECT_CREATED,
        EntityKind::Project,
        &project.id,
        &project,
    );

    let baseline = {
        let mut tasks = state.tasks.write().await;
        let mut created = Vec::with_capacity(BASELINE_PHASES.len());
        for phase in BASELINE_PHASES {
            created.push(tasks.add(baseline_task(&project, phase))?);
        }
        created
    };
    for task in &baseline {
        publish_change(state, session, event_types::TASK_CREATED, EntityKind::Task, &task.id, task);
    }

    tracing::debug!(project_id = %project.id, tasks = baseline.len(), "Baseline tasks created");
    Ok(project)
}

fn baseline_task(project: &Project, phase: WorkflowPhase) -> CreateTask {
    let title = match phase {
        WorkflowPhase::DesignReview => "Design documentation review",
        WorkflowPhase::Installation => "Installation works",
    };
    CreateTask {
        title: format!("{title}: {}", project.code),
        description: String::new(),
        status: None,
        priority: project.priority,
        assignee: project.assignee.clone(),
        project: project.id.clone(),
        project_name: project.name.clone(),
        deadline: project.deadline,
        task_type: phase.task_type(),
    }
}

pub async fn update_project(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateProject,
) -> AppResult<Option<Project>> {
    state.authorize(session).await?;
    let updated = state.projects.write().await.update(id, input)?;
    if let Some(project) = &updated {
        tracing::debug!(project_id = %project.id, "Project updated");
        publish_change(state, session, event_types::PROJECT_UPDATED, EntityKind::Project, id, project);
    }
    Ok(updated)
}

/// Remove a project. Its tasks and documents stay where they are.
pub async fn remove_project(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Project>> {
    state.authorize(session).await?;
    let removed = state.projects.write().await.remove(id);
    if let Some(project) = &removed {
        publish_change(state, session, event_types::PROJECT_REMOVED, EntityKind::Project, id, project);
    }
    Ok(removed)
}

pub async fn list_projects(state: &AppState) -> Arc<Vec<Project>> {
    state.projects.read().await.list()
}

pub async fn get_project(state: &AppState, id: &str) -> Option<Project> {
    state.projects.read().await.find(id).cloned()
}

pub async fn projects_by_status(
    state: &AppState,
    phase: WorkflowPhase,
    status: WorkflowStatus,
) -> Vec<Project> {
    state.projects.read().await.filter_by_status(phase, status)
}

pub async fn active_projects(state: &AppState) -> Vec<Project> {
    state.projects.read().await.active()
}

/// Tasks of the project identified by `key` (id or code).
pub async fn project_tasks(state: &AppState, key: &str) -> Vec<Task> {
    super::tasks::tasks_for_project(state, key).await
}
