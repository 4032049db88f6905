//! Case collaborator repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::agent::Agent;
use claimdesk_entity::collaborator::CaseCollaborator;

/// Repository for per-case presence join rows.
#[derive(Debug, Clone)]
pub struct CollaboratorRepository {
    pool: PgPool,
}

impl CollaboratorRepository {
    /// Create a new collaborator repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark an agent active on a case, creating the join row if needed.
    ///
    /// Uniqueness is enforced on (case_id, agent_id); rejoining reactivates
    /// the existing row.
    pub async fn join(&self, case_id: Uuid, agent_id: Uuid) -> AppResult<CaseCollaborator> {
        sqlx::query_as::<_, CaseCollaborator>(
            "INSERT INTO case_collaborators (case_id, agent_id, is_active, last_activity) \
             VALUES ($1, $2, TRUE, NOW()) \
             ON CONFLICT (case_id, agent_id) \
             DO UPDATE SET is_active = TRUE, last_activity = NOW() \
             RETURNING *",
        )
        .bind(case_id)
        .bind(agent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to join case", e))
    }

    /// Mark an agent inactive on a case.
    pub async fn leave(&self, case_id: Uuid, agent_id: Uuid) -> AppResult<Option<CaseCollaborator>> {
        sqlx::query_as::<_, CaseCollaborator>(
            "UPDATE case_collaborators SET is_active = FALSE, last_activity = NOW() \
             WHERE case_id = $1 AND agent_id = $2 RETURNING *",
        )
        .bind(case_id)
        .bind(agent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to leave case", e))
    }

    /// Record activity (cursor position, last_activity touch).
    pub async fn touch(
        &self,
        case_id: Uuid,
        agent_id: Uuid,
        cursor_position: Option<&serde_json::Value>,
    ) -> AppResult<Option<CaseCollaborator>> {
        sqlx::query_as::<_, CaseCollaborator>(
            "UPDATE case_collaborators \
             SET last_activity = NOW(), cursor_position = COALESCE($3, cursor_position) \
             WHERE case_id = $1 AND agent_id = $2 AND is_active = TRUE RETURNING *",
        )
        .bind(case_id)
        .bind(agent_id)
        .bind(cursor_position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch collaborator", e))
    }

    /// List active collaborator rows for a case.
    pub async fn find_active(&self, case_id: Uuid) -> AppResult<Vec<CaseCollaborator>> {
        sqlx::query_as::<_, CaseCollaborator>(
            "SELECT * FROM case_collaborators WHERE case_id = $1 AND is_active = TRUE",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list collaborators", e))
    }

    /// List the agents currently active on a case, joined with identity
    /// and presence status.
    pub async fn find_active_agents(&self, case_id: Uuid) -> AppResult<Vec<Agent>> {
        sqlx::query_as::<_, Agent>(
            "SELECT a.* FROM agents a \
             JOIN case_collaborators c ON c.agent_id = a.id \
             WHERE c.case_id = $1 AND c.is_active = TRUE \
             ORDER BY c.last_activity DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active agents", e))
    }

    /// Deactivate rows whose last activity predates the cutoff.
    ///
    /// Nothing schedules this today; it exists so a deployment can heal
    /// stale presence rows left by crashed clients.
    pub async fn deactivate_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE case_collaborators SET is_active = FALSE \
             WHERE is_active = TRUE AND last_activity < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate stale rows", e)
        })?;
        Ok(result.rows_affected())
    }
}
