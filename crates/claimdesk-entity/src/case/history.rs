//! Case history entity: the append-only audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One entry in a case's audit trail. Entries are never updated or
/// deleted; corrections are recorded as new entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseHistory {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The case this entry belongs to.
    pub case_id: Uuid,
    /// Short action label (e.g. "Case created", "Status changed").
    pub action: String,
    /// Optional free-text detail.
    pub details: Option<String>,
    /// Who performed the action, if known.
    pub performed_by: Option<String>,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
