//! Case history repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::case::CaseHistory;

/// Repository for the append-only case audit trail.
#[derive(Debug, Clone)]
pub struct CaseHistoryRepository {
    pool: PgPool,
}

impl CaseHistoryRepository {
    /// Create a new case history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit entry for a case.
    pub async fn append(
        &self,
        case_id: Uuid,
        action: &str,
        details: Option<&str>,
        performed_by: Option<&str>,
    ) -> AppResult<CaseHistory> {
        sqlx::query_as::<_, CaseHistory>(
            "INSERT INTO case_history (case_id, action, details, performed_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(case_id)
        .bind(action)
        .bind(details)
        .bind(performed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append history", e))
    }

    /// List all entries for a case, newest first.
    pub async fn find_by_case(&self, case_id: Uuid) -> AppResult<Vec<CaseHistory>> {
        sqlx::query_as::<_, CaseHistory>(
            "SELECT * FROM case_history WHERE case_id = $1 ORDER BY created_at DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list history", e))
    }
}
