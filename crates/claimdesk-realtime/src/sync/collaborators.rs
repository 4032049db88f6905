//! Per-case collaborator presence and the avatar stack projection.
//!
//! Subscribes to collaborator rows scoped to one case and projects the
//! active agents into the avatar stack shown on the case header: up to
//! four visible avatars plus a "+N" overflow badge.

use async_trait::async_trait;
use uuid::Uuid;

use claimdesk_core::events::ChangeEvent;
use claimdesk_core::result::AppResult;
use claimdesk_entity::agent::Agent;

/// Most avatars rendered before the overflow badge takes over.
pub const MAX_VISIBLE_AVATARS: usize = 4;

/// Storage seam for the active collaborators of a case.
#[async_trait]
pub trait ActiveCollaborators: Send + Sync {
    /// Returns the agents currently active on a case, most recently
    /// active first.
    async fn fetch_active(&self, case_id: Uuid) -> AppResult<Vec<Agent>>;
}

/// One rendered avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    /// The agent behind the avatar.
    pub agent_id: Uuid,
    /// Initials shown when no image is available.
    pub initials: String,
    /// Background color for the initials fallback.
    pub color: String,
    /// Full name for the tooltip.
    pub name: String,
}

/// The avatar stack: visible avatars plus an overflow count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarStack {
    /// Avatars rendered individually, at most [`MAX_VISIBLE_AVATARS`].
    pub visible: Vec<Avatar>,
    /// Number of collaborators folded into the overflow badge.
    pub overflow: usize,
}

impl AvatarStack {
    /// Projects an ordered collaborator list into the stack.
    pub fn project(agents: &[Agent]) -> Self {
        let visible = agents
            .iter()
            .take(MAX_VISIBLE_AVATARS)
            .map(|agent| Avatar {
                agent_id: agent.id,
                initials: agent.initials(),
                color: agent.avatar_color.clone(),
                name: agent.name.clone(),
            })
            .collect();
        Self {
            visible,
            overflow: agents.len().saturating_sub(MAX_VISIBLE_AVATARS),
        }
    }

    /// The overflow badge text, if any collaborators are folded.
    pub fn badge(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }
}

/// Client-held view of one case's active collaborators.
#[derive(Debug)]
pub struct CollaboratorSync<B: ActiveCollaborators> {
    backend: B,
    case_id: Uuid,
    collaborators: Vec<Agent>,
}

impl<B: ActiveCollaborators> CollaboratorSync<B> {
    /// Creates an empty view scoped to one case.
    pub fn new(backend: B, case_id: Uuid) -> Self {
        Self {
            backend,
            case_id,
            collaborators: Vec::new(),
        }
    }

    /// The case this view is scoped to.
    pub fn case_id(&self) -> Uuid {
        self.case_id
    }

    /// The active collaborators, most recently active first.
    pub fn collaborators(&self) -> &[Agent] {
        &self.collaborators
    }

    /// Projects the current collaborators into the avatar stack.
    pub fn avatar_stack(&self) -> AvatarStack {
        AvatarStack::project(&self.collaborators)
    }

    /// Replaces the local list with a fresh snapshot for this case.
    pub async fn fetch(&mut self) -> AppResult<()> {
        self.collaborators = self.backend.fetch_active(self.case_id).await?;
        Ok(())
    }

    /// Reacts to a collaborator change event.
    ///
    /// Events for other cases are ignored even if the subscription filter
    /// let them through; matching events refetch, since activation state
    /// lives in the join row and the local list holds joined agents.
    pub async fn apply_event(&mut self, event: &ChangeEvent) -> AppResult<()> {
        if event.case_id() == Some(self.case_id) {
            self.fetch().await?;
        }
        Ok(())
    }
}
