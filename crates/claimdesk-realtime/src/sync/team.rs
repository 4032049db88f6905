//! Team presence synchronization.
//!
//! Watches the presence channel and keeps the org-wide agent roster
//! current. Online/away counts are derived from the roster on read, not
//! tracked as separate state.

use async_trait::async_trait;

use claimdesk_core::events::PresenceSignal;
use claimdesk_core::result::AppResult;
use claimdesk_entity::agent::{Agent, AgentStatus};

/// Storage seam for the agent roster.
#[async_trait]
pub trait AgentRoster: Send + Sync {
    /// Returns all agents, most recently seen first.
    async fn fetch_agents(&self) -> AppResult<Vec<Agent>>;
}

/// Client-held view of the agent roster with derived presence counts.
#[derive(Debug)]
pub struct TeamPresenceSync<B: AgentRoster> {
    backend: B,
    agents: Vec<Agent>,
}

impl<B: AgentRoster> TeamPresenceSync<B> {
    /// Creates an empty view. Call [`fetch`](Self::fetch) to load the
    /// initial roster.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            agents: Vec::new(),
        }
    }

    /// The roster, most recently seen first.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents currently online.
    pub fn online_count(&self) -> usize {
        self.count(AgentStatus::Online)
    }

    /// Number of agents currently away.
    pub fn away_count(&self) -> usize {
        self.count(AgentStatus::Away)
    }

    /// Replaces the roster with a fresh snapshot.
    pub async fn fetch(&mut self) -> AppResult<()> {
        self.agents = self.backend.fetch_agents().await?;
        Ok(())
    }

    /// Reacts to a presence signal. Every signal means the same thing:
    /// the roster changed somewhere, re-read it.
    pub async fn apply_signal(&mut self, signal: PresenceSignal) -> AppResult<()> {
        match signal {
            PresenceSignal::Sync => self.fetch().await,
        }
    }

    fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }
}
