//! Case repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::case::{Case, CasePriority, CaseStatus};

/// Parameters for creating a case. `status` is omitted deliberately:
/// new cases always start as `open`.
#[derive(Debug, Clone)]
pub struct NewCase {
    /// Name of the policy holder.
    pub customer_name: String,
    /// Policy number.
    pub policy_number: String,
    /// Claim type.
    pub claim_type: String,
    /// US state.
    pub state: String,
    /// Claimed amount in dollars.
    pub claim_amount: f64,
    /// Date the incident occurred.
    pub date_of_incident: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Triage priority.
    pub priority: CasePriority,
    /// Assigned agent, if any.
    pub assigned_to: Option<Uuid>,
}

/// Fields that may change on an update. `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct CaseUpdate {
    /// New workflow status.
    pub status: Option<CaseStatus>,
    /// New triage priority.
    pub priority: Option<CasePriority>,
    /// New description.
    pub description: Option<String>,
    /// New assignee.
    pub assigned_to: Option<Uuid>,
}

/// Repository for case CRUD operations.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all cases, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cases", e))
    }

    /// Find a case by id.
    pub async fn find_by_id(&self, case_id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find case", e))
    }

    /// Create a case. Status defaults to `open` in the schema.
    pub async fn create(&self, new_case: &NewCase) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "INSERT INTO cases (customer_name, policy_number, claim_type, state, claim_amount, \
             date_of_incident, description, priority, assigned_to) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&new_case.customer_name)
        .bind(&new_case.policy_number)
        .bind(&new_case.claim_type)
        .bind(&new_case.state)
        .bind(new_case.claim_amount)
        .bind(new_case.date_of_incident)
        .bind(&new_case.description)
        .bind(new_case.priority)
        .bind(new_case.assigned_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create case", e))
    }

    /// Apply a partial update. No transition graph is enforced: any status
    /// may move to any status.
    pub async fn update(&self, case_id: Uuid, update: &CaseUpdate) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>(
            "UPDATE cases SET \
             status = COALESCE($2, status), \
             priority = COALESCE($3, priority), \
             description = COALESCE($4, description), \
             assigned_to = COALESCE($5, assigned_to), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(case_id)
        .bind(update.status)
        .bind(update.priority)
        .bind(&update.description)
        .bind(update.assigned_to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update case", e))
    }

    /// Delete a case. Returns whether a row was removed.
    pub async fn delete(&self, case_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(case_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete case", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count cases by status, for the analytics view.
    pub async fn count_by_status(&self, status: CaseStatus) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cases WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count cases", e))
    }
}
