//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use claimdesk_core::error::AppError;

use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notifications = state.notification_service.list().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": notifications }),
    ))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count().await?;
    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as u64,
    })))
}

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let notification = state
        .notification_service
        .create(&req.title, &req.message, req.kind, req.link.as_deref())
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": notification }),
    ))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notification = state.notification_service.mark_read(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": notification }),
    ))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.notification_service.mark_all_read().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "marked": count } }),
    ))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.notification_service.delete(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Notification deleted" } }),
    ))
}

/// DELETE /api/notifications
pub async fn clear_all(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.notification_service.clear_all().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "cleared": count } }),
    ))
}
