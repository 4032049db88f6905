//! Application assembly.

use axum::Router;
use sqlx::PgPool;

use claimdesk_core::config::AppConfig;
use claimdesk_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the full application: wires state from configuration and an
/// established pool, then mounts all routes and middleware.
pub fn build_app(config: AppConfig, db_pool: PgPool) -> AppResult<Router> {
    let state = AppState::new(config, db_pool)?;
    Ok(build_router(state))
}
