//! Document commands.

use std::sync::Arc;

use fibertrack_core::status::{DocumentStatus, DocumentType};
use fibertrack_db::models::document::{CreateDocument, Document, UpdateDocument};
use fibertrack_events::{types as event_types, EntityKind};

use super::publish_change;
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn create_document(
    state: &AppState,
    session: &Session,
    input: CreateDocument,
) -> AppResult<Document> {
    state.authorize(session).await?;
    let document = state.documents.write().await.add(input)?;
    publish_change(
        state,
        session,
        event_types::DOCUMENT_CREATED,
        EntityKind::Document,
        &document.id,
        &document,
    );
    Ok(document)
}

pub async fn update_document(
    state: &AppState,
    session: &Session,
    id: &str,
    input: UpdateDocument,
) -> AppResult<Option<Document>> {
    state.authorize(session).await?;
    let updated = state.documents.write().await.update(id, input)?;
    if let Some(document) = &updated {
        publish_change(state, session, event_types::DOCUMENT_UPDATED, EntityKind::Document, id, document);
    }
    Ok(updated)
}

pub async fn remove_document(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<Option<Document>> {
    state.authorize(session).await?;
    let removed = state.documents.write().await.remove(id);
    if let Some(document) = &removed {
        publish_change(state, session, event_types::DOCUMENT_REMOVED, EntityKind::Document, id, document);
    }
    Ok(removed)
}

pub async fn list_documents(state: &AppState) -> Arc<Vec<Document>> {
    state.documents.read().await.list()
}

pub async fn documents_by_status(state: &AppState, status: DocumentStatus) -> Vec<Document> {
    state.documents.read().await.by_status(status)
}

pub async fn documents_by_type(state: &AppState, doc_type: DocumentType) -> Vec<Document> {
    state.documents.read().await.by_type(doc_type)
}

/// Documents whose code contains the code of the project identified by
/// `key` (id or code). Unknown keys are matched as a raw code fragment.
pub async fn documents_for_project(state: &AppState, key: &str) -> Vec<Document> {
    let code = {
        let projects = state.projects.read().await;
        projects
            .find(key)
            .map(|p| p.code.clone())
            .unwrap_or_else(|| key.to_string())
    };
    state.documents.read().await.for_project_code(&code)
}
