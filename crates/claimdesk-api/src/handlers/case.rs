//! Case handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use claimdesk_core::error::AppError;
use claimdesk_database::repositories::{CaseUpdate, NewCase};

use crate::dto::request::{CreateCaseRequest, RecordActivityRequest, UpdateCaseRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/cases
pub async fn list_cases(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cases = state.case_service.list().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cases })))
}

/// GET /api/cases/stats
pub async fn case_stats(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = state.case_service.stats().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": stats })))
}

/// GET /api/cases/{id}
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.case_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let new_case = NewCase {
        customer_name: req.customer_name,
        policy_number: req.policy_number,
        claim_type: req.claim_type,
        state: req.state,
        claim_amount: req.claim_amount,
        date_of_incident: req.date_of_incident,
        description: req.description,
        priority: req.priority,
        assigned_to: req.assigned_to,
    };
    let case = state
        .case_service
        .create(new_case, req.performed_by.as_deref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// PUT /api/cases/{id}
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let update = CaseUpdate {
        status: req.status,
        priority: req.priority,
        description: req.description,
        assigned_to: req.assigned_to,
    };
    let case = state
        .case_service
        .update(id, update, req.performed_by.as_deref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// DELETE /api/cases/{id}
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.case_service.delete(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Case deleted" } }),
    ))
}

/// GET /api/cases/{id}/history
pub async fn case_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = state.case_service.history(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entries })))
}

/// POST /api/cases/{id}/history
pub async fn record_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordActivityRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let entry = state
        .case_service
        .record_activity(
            id,
            &req.action,
            req.details.as_deref(),
            req.performed_by.as_deref(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entry })))
}
