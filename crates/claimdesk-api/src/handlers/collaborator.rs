//! Case collaborator (per-case presence) handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::{JoinCaseRequest, TouchCollaboratorRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/cases/{id}/collaborators
pub async fn active_collaborators(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let agents = state.collaborator_service.active_agents(case_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": agents })))
}

/// POST /api/cases/{id}/collaborators
pub async fn join_case(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Json(req): Json<JoinCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let row = state
        .collaborator_service
        .join(case_id, req.agent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": row })))
}

/// PUT /api/cases/{id}/collaborators/{agent_id}
pub async fn touch_collaborator(
    State(state): State<AppState>,
    Path((case_id, agent_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<TouchCollaboratorRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let row = state
        .collaborator_service
        .touch(case_id, agent_id, req.cursor_position.as_ref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": row })))
}

/// DELETE /api/cases/{id}/collaborators/{agent_id}
pub async fn leave_case(
    State(state): State<AppState>,
    Path((case_id, agent_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let row = state.collaborator_service.leave(case_id, agent_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": row })))
}
