//! Document entity model and DTOs.

use fibertrack_core::status::{DocumentStatus, DocumentType};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::merge;

/// A project document (design or as-built set).
///
/// Association with a project is by substring of `code` only, e.g.
/// `TEST-001-RD` belongs to project code `TEST-001`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub code: String,
    pub name: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub customer: String,
    pub created_at: Timestamp,
}

impl_record!(Document, "document");

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Defaults to `draft` if omitted.
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub customer: String,
}

impl CreateDocument {
    pub fn into_document(self, id: EntityId, created_at: Timestamp) -> Document {
        Document {
            id,
            doc_type: self.doc_type,
            code: self.code,
            name: self.name,
            status: self.status.unwrap_or(DocumentStatus::Draft),
            customer: self.customer,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    #[validate(length(min = 1))]
    pub code: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub status: Option<DocumentStatus>,
    pub customer: Option<String>,
}

impl UpdateDocument {
    pub fn apply(self, document: &mut Document) {
        merge(&mut document.doc_type, self.doc_type);
        merge(&mut document.code, self.code);
        merge(&mut document.name, self.name);
        merge(&mut document.status, self.status);
        merge(&mut document.customer, self.customer);
    }
}
