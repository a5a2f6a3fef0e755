//! Core data models.
//!
//! [`RawDocument`], [`Collection`] and [`GroupMembershipBundle`] mirror the
//! Outline API payloads. [`OutlineRecord`] is what the loader hands to
//! callers: the document body plus a flat metadata block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as returned by `documents.list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub id: String,
    pub text: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    /// Path relative to the service base URL (e.g. `/doc/intro-a1b2`).
    pub url: String,
    #[serde(default)]
    pub archived_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    pub collection_id: String,
    #[serde(default)]
    pub parent_document_id: Option<String>,
    #[serde(default)]
    pub is_collection_deleted: bool,
}

/// A collection as returned by `collections.list` / `collections.info`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `"read"`, `"read_write"`, or `null` for private collections.
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One explicit document/group grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembership {
    pub id: String,
    pub group_id: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReadGroup {
    pub id: String,
    pub name: String,
}

/// One `data` item of `documents.group_memberships`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembershipBundle {
    #[serde(default)]
    pub group_memberships: Vec<GroupMembership>,
    #[serde(default)]
    pub groups: Vec<ReadGroup>,
}

/// Flat metadata attached to every [`OutlineRecord`].
///
/// Field names serialize exactly as downstream indexers expect them: the
/// document fields keep Outline's camelCase, the joined fields are
/// snake_case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub id: String,
    pub title: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "archivedAt")]
    pub archived_at: Option<String>,
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<String>,
    #[serde(rename = "collectionId")]
    pub collection_id: String,
    #[serde(rename = "parentDocumentId")]
    pub parent_document_id: Option<String>,
    #[serde(rename = "isCollectionDeleted")]
    pub is_collection_deleted: bool,
    pub collection_permission: Option<String>,
    pub collection_name: String,
    pub collection_description: Option<String>,
    pub read_groups: Vec<ReadGroup>,
}

/// A loaded document, ready for indexing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineRecord {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

impl OutlineRecord {
    /// Join a raw document with its collection and read groups.
    pub fn assemble(
        base_url: &str,
        document: RawDocument,
        collection: &Collection,
        read_groups: Vec<ReadGroup>,
    ) -> Self {
        let metadata = DocumentMetadata {
            source: format!("{}{}", base_url, document.url),
            id: document.id,
            title: document.title,
            created_at: document.created_at,
            updated_at: document.updated_at,
            archived_at: document.archived_at,
            deleted_at: document.deleted_at,
            collection_id: document.collection_id,
            parent_document_id: document.parent_document_id,
            is_collection_deleted: document.is_collection_deleted,
            collection_permission: collection.permission.clone(),
            collection_name: collection.name.clone(),
            collection_description: collection.description.clone(),
            read_groups,
        };

        Self {
            page_content: document.text,
            metadata,
        }
    }

    /// Metadata as a JSON object keyed by the wire field names.
    pub fn metadata_json(&self) -> serde_json::Result<serde_json::Map<String, Value>> {
        match serde_json::to_value(&self.metadata)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "metadata serialized to a non-object: {}",
                other
            ))),
        }
    }
}
