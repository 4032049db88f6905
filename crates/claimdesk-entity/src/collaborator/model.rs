//! Case collaborator entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A presence join row: one agent currently working a case.
///
/// A row is "active" only while `is_active` is true. There is no TTL on
/// active rows; a client that crashes without clearing the flag leaves a
/// stale entry until something heals it (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseCollaborator {
    /// Unique row identifier.
    pub id: Uuid,
    /// The case being worked.
    pub case_id: Uuid,
    /// The collaborating agent.
    pub agent_id: Uuid,
    /// Whether the agent is currently present on the case.
    pub is_active: bool,
    /// Last recorded activity on the case.
    pub last_activity: DateTime<Utc>,
    /// Opaque cursor/selection state for live collaboration.
    pub cursor_position: Option<serde_json::Value>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}
