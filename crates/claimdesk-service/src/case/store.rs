//! Storage seams over the case repositories.

use async_trait::async_trait;
use uuid::Uuid;

use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{CaseHistoryRepository, CaseRepository, CaseUpdate, NewCase};
use claimdesk_entity::case::{Case, CaseHistory, CaseStatus};

/// Storage seam for case rows.
///
/// The production implementation is the case repository; tests use an
/// in-memory stand-in.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Returns all cases, newest first.
    async fn find_all(&self) -> AppResult<Vec<Case>>;
    /// Finds one case by id.
    async fn find_by_id(&self, case_id: Uuid) -> AppResult<Option<Case>>;
    /// Inserts a case. The stored row starts in `open` status.
    async fn create(&self, new_case: &NewCase) -> AppResult<Case>;
    /// Applies a partial update. `None` if the id does not exist.
    async fn update(&self, case_id: Uuid, update: &CaseUpdate) -> AppResult<Option<Case>>;
    /// Deletes a case. Returns whether a row was removed.
    async fn delete(&self, case_id: Uuid) -> AppResult<bool>;
    /// Counts cases in one status.
    async fn count_by_status(&self, status: CaseStatus) -> AppResult<i64>;
}

/// Storage seam for the append-only audit trail.
#[async_trait]
pub trait CaseAuditStore: Send + Sync {
    /// Appends an audit entry.
    async fn append(
        &self,
        case_id: Uuid,
        action: &str,
        details: Option<&str>,
        performed_by: Option<&str>,
    ) -> AppResult<CaseHistory>;
    /// Lists entries for a case, newest first.
    async fn find_by_case(&self, case_id: Uuid) -> AppResult<Vec<CaseHistory>>;
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn find_all(&self) -> AppResult<Vec<Case>> {
        CaseRepository::find_all(self).await
    }

    async fn find_by_id(&self, case_id: Uuid) -> AppResult<Option<Case>> {
        CaseRepository::find_by_id(self, case_id).await
    }

    async fn create(&self, new_case: &NewCase) -> AppResult<Case> {
        CaseRepository::create(self, new_case).await
    }

    async fn update(&self, case_id: Uuid, update: &CaseUpdate) -> AppResult<Option<Case>> {
        CaseRepository::update(self, case_id, update).await
    }

    async fn delete(&self, case_id: Uuid) -> AppResult<bool> {
        CaseRepository::delete(self, case_id).await
    }

    async fn count_by_status(&self, status: CaseStatus) -> AppResult<i64> {
        CaseRepository::count_by_status(self, status).await
    }
}

#[async_trait]
impl CaseAuditStore for CaseHistoryRepository {
    async fn append(
        &self,
        case_id: Uuid,
        action: &str,
        details: Option<&str>,
        performed_by: Option<&str>,
    ) -> AppResult<CaseHistory> {
        CaseHistoryRepository::append(self, case_id, action, details, performed_by).await
    }

    async fn find_by_case(&self, case_id: Uuid) -> AppResult<Vec<CaseHistory>> {
        CaseHistoryRepository::find_by_case(self, case_id).await
    }
}
