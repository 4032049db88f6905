//! Knowledge-base handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use claimdesk_core::error::AppError;
use claimdesk_entity::knowledge::{KnowledgeArticle, KnowledgeQuery};

use crate::dto::request::LogQueryRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for article listing.
#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    /// Filter articles to one category.
    pub category: Option<String>,
}

/// Query parameters for the query log.
#[derive(Debug, Deserialize)]
pub struct QueryLogParams {
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
}

const DEFAULT_QUERY_LIMIT: i64 = 20;

/// GET /api/knowledge/articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> Result<Json<ApiResponse<Vec<KnowledgeArticle>>>, ApiError> {
    let articles = state
        .knowledge_service
        .list_articles(params.category.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(articles)))
}

/// GET /api/knowledge/articles/{id}
pub async fn read_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<KnowledgeArticle>>, ApiError> {
    let article = state.knowledge_service.read_article(id).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// POST /api/knowledge/queries
pub async fn log_query(
    State(state): State<AppState>,
    Json(req): Json<LogQueryRequest>,
) -> Result<Json<ApiResponse<KnowledgeQuery>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let entry = state
        .knowledge_service
        .log_query(req.case_id, &req.query, req.response.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// GET /api/knowledge/queries
pub async fn recent_queries(
    State(state): State<AppState>,
    Query(params): Query<QueryLogParams>,
) -> Result<Json<ApiResponse<Vec<KnowledgeQuery>>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
    let queries = state.knowledge_service.recent_queries(limit).await?;
    Ok(Json(ApiResponse::ok(queries)))
}
