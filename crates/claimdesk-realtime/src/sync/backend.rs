//! Backend seam implementations over the database repositories.

use async_trait::async_trait;
use uuid::Uuid;

use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{
    AgentRepository, CaseRepository, CollaboratorRepository, NotificationRepository,
};
use claimdesk_entity::agent::Agent;
use claimdesk_entity::case::Case;
use claimdesk_entity::notification::{Notification, NotificationKind};

use super::case_list::CaseSnapshot;
use super::collaborators::ActiveCollaborators;
use super::notifications::NotificationBackend;
use super::team::AgentRoster;

#[async_trait]
impl NotificationBackend for NotificationRepository {
    async fn fetch_all(&self) -> AppResult<Vec<Notification>> {
        self.find_all().await
    }

    async fn insert(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> AppResult<Notification> {
        self.create(title, message, kind, link).await
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        NotificationRepository::mark_read(self, id).await
    }

    async fn mark_all_read(&self) -> AppResult<u64> {
        let updated = NotificationRepository::mark_all_read(self).await?;
        Ok(updated.len() as u64)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        NotificationRepository::delete(self, id).await
    }

    async fn clear_all(&self) -> AppResult<u64> {
        let removed = NotificationRepository::clear_all(self).await?;
        Ok(removed.len() as u64)
    }
}

#[async_trait]
impl CaseSnapshot for CaseRepository {
    async fn fetch_all(&self) -> AppResult<Vec<Case>> {
        self.find_all().await
    }
}

#[async_trait]
impl ActiveCollaborators for CollaboratorRepository {
    async fn fetch_active(&self, case_id: Uuid) -> AppResult<Vec<Agent>> {
        self.find_active_agents(case_id).await
    }
}

#[async_trait]
impl AgentRoster for AgentRepository {
    async fn fetch_agents(&self) -> AppResult<Vec<Agent>> {
        self.find_all().await
    }
}
