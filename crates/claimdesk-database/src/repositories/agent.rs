//! Agent repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::agent::{Agent, AgentStatus};

/// Repository for the agent roster.
#[derive(Debug, Clone)]
pub struct AgentRepository {
    pool: PgPool,
}

impl AgentRepository {
    /// Create a new agent repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all agents, most recently seen first.
    pub async fn find_all(&self) -> AppResult<Vec<Agent>> {
        sqlx::query_as::<_, Agent>("SELECT * FROM agents ORDER BY last_seen DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list agents", e))
    }

    /// Find an agent by id.
    pub async fn find_by_id(&self, agent_id: Uuid) -> AppResult<Option<Agent>> {
        sqlx::query_as::<_, Agent>("SELECT * FROM agents WHERE id = $1")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find agent", e))
    }

    /// Update an agent's presence status, touching `last_seen`.
    pub async fn set_status(
        &self,
        agent_id: Uuid,
        status: AgentStatus,
    ) -> AppResult<Option<Agent>> {
        sqlx::query_as::<_, Agent>(
            "UPDATE agents SET status = $2, last_seen = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(agent_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set agent status", e))
    }
}
