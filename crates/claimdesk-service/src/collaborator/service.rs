//! Join/leave/touch operations on per-case presence rows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::CollaboratorRepository;
use claimdesk_entity::agent::Agent;
use claimdesk_entity::collaborator::CaseCollaborator;
use claimdesk_realtime::ChangeFeedHub;

/// Manages presence join rows for cases.
#[derive(Debug, Clone)]
pub struct CollaboratorService {
    /// Collaborator repository.
    collab_repo: Arc<CollaboratorRepository>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl CollaboratorService {
    /// Creates a new collaborator service.
    pub fn new(collab_repo: Arc<CollaboratorRepository>, hub: Arc<ChangeFeedHub>) -> Self {
        Self { collab_repo, hub }
    }

    /// Marks an agent active on a case. Rejoining reactivates the existing
    /// row instead of duplicating it.
    pub async fn join(&self, case_id: Uuid, agent_id: Uuid) -> AppResult<CaseCollaborator> {
        let row = self.collab_repo.join(case_id, agent_id).await?;
        self.hub
            .publish(Table::CaseCollaborators, ChangeEvent::inserted(&row)?);
        info!(case_id = %case_id, agent_id = %agent_id, "Collaborator joined");
        Ok(row)
    }

    /// Marks an agent inactive on a case.
    pub async fn leave(&self, case_id: Uuid, agent_id: Uuid) -> AppResult<CaseCollaborator> {
        let row = self
            .collab_repo
            .leave(case_id, agent_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Agent {agent_id} is not on case {case_id}"))
            })?;
        self.hub
            .publish(Table::CaseCollaborators, ChangeEvent::updated(&row, row.id)?);
        info!(case_id = %case_id, agent_id = %agent_id, "Collaborator left");
        Ok(row)
    }

    /// Records activity, optionally with a cursor position.
    pub async fn touch(
        &self,
        case_id: Uuid,
        agent_id: Uuid,
        cursor_position: Option<&serde_json::Value>,
    ) -> AppResult<CaseCollaborator> {
        let row = self
            .collab_repo
            .touch(case_id, agent_id, cursor_position)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Agent {agent_id} is not active on case {case_id}"))
            })?;
        self.hub
            .publish(Table::CaseCollaborators, ChangeEvent::updated(&row, row.id)?);
        Ok(row)
    }

    /// Lists the agents currently active on a case, most recently active
    /// first.
    pub async fn active_agents(&self, case_id: Uuid) -> AppResult<Vec<Agent>> {
        self.collab_repo.find_active_agents(case_id).await
    }

    /// Deactivates presence rows whose last activity predates the cutoff.
    /// Deployments that want stale-row healing call this on a schedule.
    pub async fn deactivate_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let healed = self.collab_repo.deactivate_stale(cutoff).await?;
        if healed > 0 {
            info!(healed, "Stale collaborator rows deactivated");
        }
        Ok(healed)
    }
}
