//! # claimdesk-api
//!
//! HTTP API layer for ClaimDesk built on Axum.
//!
//! Provides the REST endpoints, the WebSocket change-feed subscription
//! endpoint, middleware (CORS, compression, logging), DTOs, and the
//! mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
