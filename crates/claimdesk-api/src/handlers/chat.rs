//! Chat conversation handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use claimdesk_core::error::AppError;

use crate::dto::request::{CreateConversationRequest, SendMessageRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/chat/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let conversations = state.chat_service.list_conversations().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": conversations }),
    ))
}

/// POST /api/chat/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let conversation = state
        .chat_service
        .create_conversation(&req.title, req.case_id)
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": conversation }),
    ))
}

/// GET /api/chat/conversations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let messages = state.chat_service.messages(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": messages }),
    ))
}

/// POST /api/chat/conversations/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let reply = state.chat_service.send_message(id, &req.content).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": reply })))
}

/// DELETE /api/chat/conversations/{id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.chat_service.delete_conversation(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Conversation deleted" } }),
    ))
}
