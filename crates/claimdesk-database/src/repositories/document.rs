//! Document repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::document::{Document, DocumentStatus};

/// Parameters for registering an uploaded document. The blob is already
/// in external storage; this only records the row.
#[derive(Debug, Clone)]
pub struct NewDocument {
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
    /// Library category.
    pub category: String,
    /// Who uploaded the document.
    pub uploaded_by: Option<String>,
}

/// Repository for document CRUD operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all documents, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Find a document by id.
    pub async fn find_by_id(&self, document_id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// Register a document. Status starts as `pending` per the schema.
    pub async fn create(&self, new_doc: &NewDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (title, description, file_name, file_type, file_size, \
             file_url, category, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&new_doc.title)
        .bind(&new_doc.description)
        .bind(&new_doc.file_name)
        .bind(&new_doc.file_type)
        .bind(new_doc.file_size)
        .bind(&new_doc.file_url)
        .bind(&new_doc.category)
        .bind(&new_doc.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Advance the indexing status.
    pub async fn set_status(
        &self,
        document_id: Uuid,
        status: DocumentStatus,
    ) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(document_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set document status", e)
        })
    }

    /// Delete a document row. Returns whether a row was removed. The blob
    /// itself is the storage backend's concern.
    pub async fn delete(&self, document_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(document_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
