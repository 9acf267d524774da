//! Task commands.

use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_core::status::{TaskStatus, TaskType};
use fibertrack_db::models::task::{CreateTask, Task, UpdateTask};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

/// Create a task. `input.project` may be a project id or code; it is stored
/// as the id.
pub async fn create_task(
    state: &AppState,
    session: &Session,
    mut input: CreateTask,
) -> AppResult<Task> {
    state.authorize(session).await?;

    {
        let projects = state.projects.read().await;
        let project_id = projects
            .resolve_key(&input.project)
            .ok_or_else(|| CoreError::NotFound {
                entity: "project",
                id: input.project.clone(),
            })?;
        if input.project_name.is_empty() {
            if let Some(project) = projects.find(&project_id) {
                input.project_name = project.name.clone();
            }
        }
        input.project = project_id;
    }

    let task = state.tasks.write().await.add(input)?;
    publish_change(state, session, event_types::TASK_CREATED, EntityKind::Task, &task.id, &task);
    Ok(task)
}

/// Patch a task. A new `project` may be given as id or code; it is stored as
/// the id.
pub async fn update_task(
    state: &AppState,
    session: &Session,
    id: &str,
    mut input: UpdateTask,
) -> AppResult<Option<Task>> {
    state.authorize(session).await?;
    if let Some(key) = input.project.take() {
        let projects = state.projects.read().await;
        let project = projects
            .resolve_key(&key)
            .and_then(|project_id| projects.find(&project_id))
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: key,
            })?;
        if input.project_name.is_none() {
            input.project_name = Some(project.name.clone());
        }
        input.project = Some(project.id.clone());
    }
    let updated = state.tasks.write().await.update(id, input)?;
    if let Some(task) = &updated {
        publish_change(state, session, event_types::TASK_UPDATED, EntityKind::Task, id, task);
    }
    Ok(updated)
}

pub async fn set_task_status(
    state: &AppState,
    session: &Session,
    id: &str,
    status: TaskStatus,
) -> AppResult<Option<Task>> {
    update_task(state, session, id, UpdateTask::status(status)).await
}

pub async fn remove_task(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Task>> {
    state.authorize(session).await?;
    let removed = state.tasks.write().await.remove(id);
    if let Some(task) = &removed {
        publish_change(state, session, event_types::TASK_REMOVED, EntityKind::Task, id, task);
    }
    Ok(removed)
}

pub async fn list_tasks(state: &AppState) -> Arc<Vec<Task>> {
    state.tasks.read().await.list()
}

/// Tasks of the project identified by `key`, which may be an id or a code.
/// Empty when no project matches.
pub async fn tasks_for_project(state: &AppState, key: &str) -> Vec<Task> {
    let Some(project_id) = state.projects.read().await.resolve_key(key) else {
        return Vec::new();
    };
    state.tasks.read().await.by_project(&project_id)
}

pub async fn tasks_by_status(state: &AppState, status: TaskStatus) -> Vec<Task> {
    state.tasks.read().await.by_status(status)
}

pub async fn tasks_by_assignee(state: &AppState, assignee: &str) -> Vec<Task> {
    state.tasks.read().await.by_assignee(assignee)
}

pub async fn tasks_by_type(state: &AppState, task_type: TaskType) -> Vec<Task> {
    state.tasks.read().await.by_type(task_type)
}

/// Rewrite tasks that still reference a project by code to use its id.
///
/// Admin only. Returns the number of tasks changed.
pub async fn relink_project_codes(state: &AppState, session: &Session) -> AppResult<usize> {
    state.authorize(session).await?;
    if !session.is_admin() {
        return Err(CoreError::Forbidden("relinking tasks requires admin access".into()).into());
    }
    let projects = state.projects.read().await.list();
    let changed = state.tasks.write().await.relink_project_codes(&projects);
    if changed > 0 {
        tracing::info!(changed, "Task project references relinked");
        publish_change(
            state,
            session,
            event_types::TASK_UPDATED,
            EntityKind::Task,
            "*",
            &serde_json::json!({ "relinked": changed }),
        );
    }
    Ok(changed)
}
