//! Document entity model.
//!
//! The file blob lives in external storage; the row is created after the
//! upload completes and references the blob by URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Indexing status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "document_status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Fully indexed and searchable.
    Indexed,
    /// Indexing in progress.
    Processing,
    /// Awaiting processing.
    Pending,
}

impl DocumentStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexed => "indexed",
            Self::Processing => "processing",
            Self::Pending => "pending",
        }
    }
}

/// A document in the library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Blob storage URL.
    pub file_url: String,
    /// Library category (e.g. "Policies", "Regulations").
    pub category: String,
    /// Indexing status.
    pub status: DocumentStatus,
    /// Who uploaded the document, if known.
    pub uploaded_by: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}
