//! Document handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use claimdesk_core::error::AppError;
use claimdesk_database::repositories::NewDocument;

use crate::dto::request::{CreateDocumentRequest, SetDocumentStatusRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let documents = state.document_service.list().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": documents }),
    ))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let document = state.document_service.get(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": document }),
    ))
}

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let new_doc = NewDocument {
        title: req.title,
        description: req.description,
        file_name: req.file_name,
        file_type: req.file_type,
        file_size: req.file_size,
        file_url: req.file_url,
        category: req.category,
        uploaded_by: req.uploaded_by,
    };
    let document = state.document_service.create(new_doc).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": document }),
    ))
}

/// PUT /api/documents/{id}/status
pub async fn set_document_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetDocumentStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let document = state.document_service.set_status(id, req.status).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": document }),
    ))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.document_service.delete(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Document deleted" } }),
    ))
}
