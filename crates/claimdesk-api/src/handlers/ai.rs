//! AI proxy handlers.
//!
//! These endpoints front the AI gateway and the document-QA provider so
//! that browser clients never hold provider credentials. The chat proxy
//! is stateless; persisted conversations go through the chat handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use claimdesk_ai::docqa::DocQaAnswer;
use claimdesk_core::error::AppError;
use claimdesk_service::DocumentSearchResult;

use crate::dto::request::{AiChatRequest, DocumentQaRequest, DocumentSearchRequest};
use crate::dto::response::{AiChatResponse, ApiResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/ai/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<AiChatRequest>,
) -> Result<Json<ApiResponse<AiChatResponse>>, ApiError> {
    if req.messages.is_empty() {
        return Err(AppError::validation("At least one message is required").into());
    }
    let reply = claimdesk_ai::chat::complete(
        &state.gateway,
        &req.messages,
        req.case_context.as_ref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(AiChatResponse { response: reply })))
}

/// POST /api/ai/documents/search
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<DocumentSearchRequest>,
) -> Result<Json<ApiResponse<DocumentSearchResult>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let result = state.document_service.search(&req.query).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/ai/documents/qa
pub async fn document_qa(
    State(state): State<AppState>,
    Json(req): Json<DocumentQaRequest>,
) -> Result<Json<ApiResponse<DocQaAnswer>>, ApiError> {
    let answer = state.docqa.answer(&req.url, &req.question).await?;
    Ok(Json(ApiResponse::ok(answer)))
}
