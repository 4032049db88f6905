//! Agent roster handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::SetAgentStatusRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/agents
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let agents = state.agent_service.roster().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": agents })))
}

/// GET /api/agents/{id}
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let agent = state.agent_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": agent })))
}

/// PUT /api/agents/{id}/status
pub async fn set_agent_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetAgentStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let agent = state.agent_service.set_status(id, req.status).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": agent })))
}
