//! Case CRUD, status workflow and the append-only audit trail.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{CaseUpdate, NewCase};
use claimdesk_entity::case::{Case, CaseHistory, CaseStatus};
use claimdesk_realtime::ChangeFeedHub;

use super::store::{CaseAuditStore, CaseStore};

/// Per-status case counts for the analytics view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStats {
    /// Cases in `open`.
    pub open: i64,
    /// Cases in `in_review`.
    pub in_review: i64,
    /// Cases in `pending`.
    pub pending: i64,
    /// Cases in `approved`.
    pub approved: i64,
    /// Cases in `denied`.
    pub denied: i64,
}

/// Manages the case lifecycle: CRUD, audit trail, change-feed fan-out.
#[derive(Clone)]
pub struct CaseService {
    /// Case store.
    case_store: Arc<dyn CaseStore>,
    /// Audit trail store.
    audit_store: Arc<dyn CaseAuditStore>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl fmt::Debug for CaseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseService").finish_non_exhaustive()
    }
}

impl CaseService {
    /// Creates a new case service.
    pub fn new(
        case_store: Arc<dyn CaseStore>,
        audit_store: Arc<dyn CaseAuditStore>,
        hub: Arc<ChangeFeedHub>,
    ) -> Self {
        Self {
            case_store,
            audit_store,
            hub,
        }
    }

    /// Lists all cases, newest first.
    pub async fn list(&self) -> AppResult<Vec<Case>> {
        self.case_store.find_all().await
    }

    /// Fetches one case.
    pub async fn get(&self, case_id: Uuid) -> AppResult<Case> {
        self.case_store
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))
    }

    /// Creates a case (status starts as `open`), records the audit entry
    /// and fans out the insert event.
    pub async fn create(
        &self,
        new_case: NewCase,
        performed_by: Option<&str>,
    ) -> AppResult<Case> {
        let case = self.case_store.create(&new_case).await?;
        self.audit_store
            .append(case.id, "Case Created", None, performed_by)
            .await?;
        self.hub.publish(Table::Cases, ChangeEvent::inserted(&case)?);
        info!(case_id = %case.id, policy = %case.policy_number, "Case created");
        Ok(case)
    }

    /// Applies a partial update. Any status may move to any status; there
    /// is no transition graph.
    pub async fn update(
        &self,
        case_id: Uuid,
        update: CaseUpdate,
        performed_by: Option<&str>,
    ) -> AppResult<Case> {
        let case = self
            .case_store
            .update(case_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))?;

        let details = format!(
            "Status: {}, Priority: {}",
            case.status.as_str(),
            case.priority.as_str()
        );
        self.audit_store
            .append(case.id, "Case Updated", Some(&details), performed_by)
            .await?;
        self.hub
            .publish(Table::Cases, ChangeEvent::updated(&case, case.id)?);
        info!(case_id = %case.id, status = case.status.as_str(), "Case updated");
        Ok(case)
    }

    /// Deletes a case and fans out the delete event.
    pub async fn delete(&self, case_id: Uuid) -> AppResult<()> {
        let case = self.get(case_id).await?;
        if !self.case_store.delete(case_id).await? {
            return Err(AppError::not_found(format!("Case {case_id} not found")));
        }
        self.hub
            .publish(Table::Cases, ChangeEvent::deleted(&case, case_id)?);
        info!(case_id = %case_id, "Case deleted");
        Ok(())
    }

    /// Returns the audit trail for a case, newest first.
    pub async fn history(&self, case_id: Uuid) -> AppResult<Vec<CaseHistory>> {
        self.audit_store.find_by_case(case_id).await
    }

    /// Appends a manual audit entry and fans out the insert event.
    pub async fn record_activity(
        &self,
        case_id: Uuid,
        action: &str,
        details: Option<&str>,
        performed_by: Option<&str>,
    ) -> AppResult<CaseHistory> {
        let entry = self
            .audit_store
            .append(case_id, action, details, performed_by)
            .await?;
        self.hub
            .publish(Table::CaseHistory, ChangeEvent::inserted(&entry)?);
        Ok(entry)
    }

    /// Counts cases per status.
    pub async fn stats(&self) -> AppResult<CaseStats> {
        Ok(CaseStats {
            open: self.case_store.count_by_status(CaseStatus::Open).await?,
            in_review: self.case_store.count_by_status(CaseStatus::InReview).await?,
            pending: self.case_store.count_by_status(CaseStatus::Pending).await?,
            approved: self.case_store.count_by_status(CaseStatus::Approved).await?,
            denied: self.case_store.count_by_status(CaseStatus::Denied).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use claimdesk_core::events::RowFilter;
    use claimdesk_entity::case::CasePriority;
    use claimdesk_realtime::FeedMessage;

    /// Case store backed by a shared vec. Inserted rows start in `open`
    /// status, matching the column default of the real table.
    #[derive(Debug, Default)]
    struct InMemoryCaseStore {
        rows: Mutex<Vec<Case>>,
    }

    #[async_trait]
    impl CaseStore for InMemoryCaseStore {
        async fn find_all(&self) -> AppResult<Vec<Case>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, case_id: Uuid) -> AppResult<Option<Case>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == case_id)
                .cloned())
        }

        async fn create(&self, new_case: &NewCase) -> AppResult<Case> {
            let row = Case {
                id: Uuid::new_v4(),
                customer_name: new_case.customer_name.clone(),
                policy_number: new_case.policy_number.clone(),
                claim_type: new_case.claim_type.clone(),
                state: new_case.state.clone(),
                claim_amount: new_case.claim_amount,
                date_of_incident: new_case.date_of_incident,
                description: new_case.description.clone(),
                status: CaseStatus::Open,
                priority: new_case.priority,
                assigned_to: new_case.assigned_to,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().insert(0, row.clone());
            Ok(row)
        }

        async fn update(&self, case_id: Uuid, update: &CaseUpdate) -> AppResult<Option<Case>> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.iter_mut().find(|c| c.id == case_id).map(|row| {
                if let Some(status) = update.status {
                    row.status = status;
                }
                if let Some(priority) = update.priority {
                    row.priority = priority;
                }
                if let Some(description) = &update.description {
                    row.description = Some(description.clone());
                }
                if let Some(assigned_to) = update.assigned_to {
                    row.assigned_to = Some(assigned_to);
                }
                row.updated_at = Utc::now();
                row.clone()
            }))
        }

        async fn delete(&self, case_id: Uuid) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.id != case_id);
            Ok(rows.len() < before)
        }

        async fn count_by_status(&self, status: CaseStatus) -> AppResult<i64> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.status == status)
                .count() as i64)
        }
    }

    /// Audit trail backed by a shared vec, newest first.
    #[derive(Debug, Default)]
    struct InMemoryAuditTrail {
        entries: Mutex<Vec<CaseHistory>>,
    }

    #[async_trait]
    impl CaseAuditStore for InMemoryAuditTrail {
        async fn append(
            &self,
            case_id: Uuid,
            action: &str,
            details: Option<&str>,
            performed_by: Option<&str>,
        ) -> AppResult<CaseHistory> {
            let entry = CaseHistory {
                id: Uuid::new_v4(),
                case_id,
                action: action.to_string(),
                details: details.map(str::to_string),
                performed_by: performed_by.map(str::to_string),
                created_at: Utc::now(),
            };
            self.entries.lock().unwrap().insert(0, entry.clone());
            Ok(entry)
        }

        async fn find_by_case(&self, case_id: Uuid) -> AppResult<Vec<CaseHistory>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.case_id == case_id)
                .cloned()
                .collect())
        }
    }

    fn service() -> (CaseService, Arc<ChangeFeedHub>) {
        let hub = Arc::new(ChangeFeedHub::new(16));
        let service = CaseService::new(
            Arc::new(InMemoryCaseStore::default()),
            Arc::new(InMemoryAuditTrail::default()),
            hub.clone(),
        );
        (service, hub)
    }

    fn jane_doe_filing() -> NewCase {
        NewCase {
            customer_name: "Jane Doe".to_string(),
            policy_number: "POL-2024-789".to_string(),
            claim_type: "Property".to_string(),
            state: "Texas".to_string(),
            claim_amount: 15000.0,
            date_of_incident: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            description: Some("Hail damage to roof".to_string()),
            priority: CasePriority::High,
            assigned_to: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_open_records_audit_and_fans_out() {
        let (service, hub) = service();
        let mut sub = hub.subscribe(Table::Cases, RowFilter::Any);

        let case = service
            .create(jane_doe_filing(), Some("Jane Doe"))
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Open);
        assert_eq!(case.state, "Texas");

        let trail = service.history(case.id).await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, "Case Created");
        assert_eq!(trail[0].performed_by.as_deref(), Some("Jane Doe"));

        match sub.recv().await {
            Some(FeedMessage::Event(ChangeEvent::Inserted { new })) => {
                assert_eq!(new["customer_name"], "Jane Doe");
                assert_eq!(new["status"], "open");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_moves_status_and_appends_audit() {
        let (service, _hub) = service();
        let case = service.create(jane_doe_filing(), None).await.unwrap();

        let updated = service
            .update(
                case.id,
                CaseUpdate {
                    status: Some(CaseStatus::Approved),
                    ..CaseUpdate::default()
                },
                Some("Sarah Chen"),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, CaseStatus::Approved);
        let trail = service.history(case.id).await.unwrap();
        assert_eq!(trail[0].action, "Case Updated");
        assert!(trail[0].details.as_deref().unwrap().contains("approved"));
    }

    #[tokio::test]
    async fn test_stats_count_per_status() {
        let (service, _hub) = service();
        service.create(jane_doe_filing(), None).await.unwrap();
        let second = service.create(jane_doe_filing(), None).await.unwrap();
        service
            .update(
                second.id,
                CaseUpdate {
                    status: Some(CaseStatus::Denied),
                    ..CaseUpdate::default()
                },
                None,
            )
            .await
            .unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.open, 1);
        assert_eq!(stats.denied, 1);
        assert_eq!(stats.approved, 0);
    }
}
