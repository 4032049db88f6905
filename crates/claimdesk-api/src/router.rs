//! Route definitions for the ClaimDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(case_routes())
        .merge(document_routes())
        .merge(notification_routes())
        .merge(agent_routes())
        .merge(chat_routes())
        .merge(knowledge_routes())
        .merge(ai_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Case CRUD, audit trail, per-case presence
fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/cases", get(handlers::case::list_cases))
        .route("/cases", post(handlers::case::create_case))
        .route("/cases/stats", get(handlers::case::case_stats))
        .route("/cases/{id}", get(handlers::case::get_case))
        .route("/cases/{id}", put(handlers::case::update_case))
        .route("/cases/{id}", delete(handlers::case::delete_case))
        .route("/cases/{id}/history", get(handlers::case::case_history))
        .route("/cases/{id}/history", post(handlers::case::record_activity))
        .route(
            "/cases/{id}/collaborators",
            get(handlers::collaborator::active_collaborators),
        )
        .route(
            "/cases/{id}/collaborators",
            post(handlers::collaborator::join_case),
        )
        .route(
            "/cases/{id}/collaborators/{agent_id}",
            put(handlers::collaborator::touch_collaborator),
        )
        .route(
            "/cases/{id}/collaborators/{agent_id}",
            delete(handlers::collaborator::leave_case),
        )
}

/// Document library CRUD
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::document::list_documents))
        .route("/documents", post(handlers::document::create_document))
        .route("/documents/{id}", get(handlers::document::get_document))
        .route(
            "/documents/{id}",
            delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/status",
            put(handlers::document::set_document_status),
        )
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications",
            post(handlers::notification::create_notification),
        )
        .route("/notifications", delete(handlers::notification::clear_all))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

/// Agent roster and presence status
fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(handlers::agent::list_agents))
        .route("/agents/{id}", get(handlers::agent::get_agent))
        .route("/agents/{id}/status", put(handlers::agent::set_agent_status))
}

/// Persisted chat conversations
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chat/conversations",
            get(handlers::chat::list_conversations),
        )
        .route(
            "/chat/conversations",
            post(handlers::chat::create_conversation),
        )
        .route(
            "/chat/conversations/{id}",
            delete(handlers::chat::delete_conversation),
        )
        .route(
            "/chat/conversations/{id}/messages",
            get(handlers::chat::list_messages),
        )
        .route(
            "/chat/conversations/{id}/messages",
            post(handlers::chat::send_message),
        )
}

/// Knowledge-base endpoints
fn knowledge_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/knowledge/articles",
            get(handlers::knowledge::list_articles),
        )
        .route(
            "/knowledge/articles/{id}",
            get(handlers::knowledge::read_article),
        )
        .route("/knowledge/queries", get(handlers::knowledge::recent_queries))
        .route("/knowledge/queries", post(handlers::knowledge::log_query))
}

/// AI proxy endpoints
fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/chat", post(handlers::ai::chat))
        .route("/ai/documents/search", post(handlers::ai::search))
        .route("/ai/documents/qa", post(handlers::ai::document_qa))
}

/// Health check endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}
