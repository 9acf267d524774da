//! Container for project documents.

use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_core::status::{DocumentStatus, DocumentType};
use fibertrack_core::types::{new_id, now};
use validator::Validate;

use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::repositories::Collection;

#[derive(Debug, Clone, Default)]
pub struct DocumentRepo {
    rows: Collection<Document>,
}

impl DocumentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: CreateDocument) -> Result<Document, CoreError> {
        input.validate()?;
        let document = input.into_document(new_id(), now());
        self.rows.insert(document.clone())?;
        tracing::info!(document_id = %document.id, code = %document.code, "Document created");
        Ok(document)
    }

    pub fn insert(&mut self, document: Document) -> Result<(), CoreError> {
        self.rows.insert(document)
    }

    pub fn update(
        &mut self,
        id: &str,
        input: UpdateDocument,
    ) -> Result<Option<Document>, CoreError> {
        input.validate()?;
        Ok(self.rows.update_with(id, move |document| input.apply(document)))
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            tracing::info!(document_id = %id, "Document removed");
        }
        removed
    }

    pub fn list(&self) -> Arc<Vec<Document>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Document> {
        self.rows.get(id)
    }

    pub fn by_status(&self, status: DocumentStatus) -> Vec<Document> {
        self.rows.filter(|d| d.status == status)
    }

    pub fn by_type(&self, doc_type: DocumentType) -> Vec<Document> {
        self.rows.filter(|d| d.doc_type == doc_type)
    }

    /// Documents whose code contains `project_code`. A loose association:
    /// a short code can match documents of several projects.
    pub fn for_project_code(&self, project_code: &str) -> Vec<Document> {
        if project_code.is_empty() {
            return Vec::new();
        }
        self.rows.filter(|d| d.code.contains(project_code))
    }
}
