//! Agent roster and presence status changes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, PresenceSignal, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::AgentRepository;
use claimdesk_entity::agent::{Agent, AgentStatus};
use claimdesk_realtime::ChangeFeedHub;

/// Manages the agent roster.
#[derive(Debug, Clone)]
pub struct AgentService {
    /// Agent repository.
    agent_repo: Arc<AgentRepository>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl AgentService {
    /// Creates a new agent service.
    pub fn new(agent_repo: Arc<AgentRepository>, hub: Arc<ChangeFeedHub>) -> Self {
        Self { agent_repo, hub }
    }

    /// Lists the roster, most recently seen first.
    pub async fn roster(&self) -> AppResult<Vec<Agent>> {
        self.agent_repo.find_all().await
    }

    /// Fetches one agent.
    pub async fn get(&self, agent_id: Uuid) -> AppResult<Agent> {
        self.agent_repo
            .find_by_id(agent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Agent {agent_id} not found")))
    }

    /// Updates an agent's presence status.
    ///
    /// Fans out on both channels: a row-level update for subscribers of the
    /// agents table, and a presence `Sync` signal telling roster views to
    /// refetch.
    pub async fn set_status(&self, agent_id: Uuid, status: AgentStatus) -> AppResult<Agent> {
        let agent = self
            .agent_repo
            .set_status(agent_id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Agent {agent_id} not found")))?;

        self.hub
            .publish(Table::Agents, ChangeEvent::updated(&agent, agent.id)?);
        self.hub.publish_presence(PresenceSignal::Sync);
        info!(agent_id = %agent.id, status = status.as_str(), "Agent status changed");
        Ok(agent)
    }
}
