//! Change-feed event types.
//!
//! Every write to a watched table fans out as a [`ChangeEvent`], a tagged
//! union of insert/update/delete dispatched through a single handler per
//! subscription. Event payloads carry the affected row as JSON; subscribers
//! decode into typed entities at the point the row enters application state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

/// Watched tables, one change-feed channel each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Claims cases.
    Cases,
    /// Append-only case audit trail.
    CaseHistory,
    /// Per-case presence join rows.
    CaseCollaborators,
    /// Org-wide agent roster.
    Agents,
    /// Uploaded documents.
    Documents,
    /// User notifications.
    Notifications,
    /// Chat messages.
    ChatMessages,
}

impl Table {
    /// Parses a table name as used in subscription requests.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "cases" => Some(Self::Cases),
            "case_history" => Some(Self::CaseHistory),
            "case_collaborators" => Some(Self::CaseCollaborators),
            "agents" => Some(Self::Agents),
            "documents" => Some(Self::Documents),
            "notifications" => Some(Self::Notifications),
            "chat_messages" => Some(Self::ChatMessages),
            _ => None,
        }
    }

    /// Returns the table name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::CaseHistory => "case_history",
            Self::CaseCollaborators => "case_collaborators",
            Self::Agents => "agents",
            Self::Documents => "documents",
            Self::Notifications => "notifications",
            Self::ChatMessages => "chat_messages",
        }
    }
}

/// A row-level change event for a single table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A row was inserted. Carries the full new row.
    Inserted {
        /// The inserted row as JSON.
        new: serde_json::Value,
    },
    /// A row was updated. Carries the full new row; the prior row state is
    /// not available (only its id), so unread-style counters cannot be
    /// maintained incrementally from this payload.
    Updated {
        /// The updated row as JSON.
        new: serde_json::Value,
        /// The id of the row that changed.
        old_id: Uuid,
    },
    /// A row was deleted. Carries the old row as JSON.
    Deleted {
        /// The id of the deleted row.
        old_id: Uuid,
        /// The deleted row as JSON.
        old: serde_json::Value,
    },
}

impl ChangeEvent {
    /// Builds an insert event from a typed row.
    pub fn inserted<T: Serialize>(row: &T) -> AppResult<Self> {
        Ok(Self::Inserted {
            new: serde_json::to_value(row)?,
        })
    }

    /// Builds an update event from a typed row.
    pub fn updated<T: Serialize>(row: &T, old_id: Uuid) -> AppResult<Self> {
        Ok(Self::Updated {
            new: serde_json::to_value(row)?,
            old_id,
        })
    }

    /// Builds a delete event from a typed row.
    pub fn deleted<T: Serialize>(row: &T, old_id: Uuid) -> AppResult<Self> {
        Ok(Self::Deleted {
            old_id,
            old: serde_json::to_value(row)?,
        })
    }

    /// Returns the id of the affected row, if the payload carries one.
    pub fn row_id(&self) -> Option<Uuid> {
        match self {
            Self::Inserted { new } => extract_uuid(new, "id"),
            Self::Updated { old_id, .. } | Self::Deleted { old_id, .. } => Some(*old_id),
        }
    }

    /// Returns the `case_id` of the affected row, if present.
    ///
    /// Used to scope collaborator subscriptions to a single case.
    pub fn case_id(&self) -> Option<Uuid> {
        match self {
            Self::Inserted { new } | Self::Updated { new, .. } => extract_uuid(new, "case_id"),
            Self::Deleted { old, .. } => extract_uuid(old, "case_id"),
        }
    }

    /// Decodes the event payload row into a typed entity.
    ///
    /// Fails loudly on shape mismatch rather than propagating untyped JSON.
    pub fn decode_row<T: serde::de::DeserializeOwned>(&self) -> AppResult<T> {
        let value = match self {
            Self::Inserted { new } | Self::Updated { new, .. } => new,
            Self::Deleted { old, .. } => old,
        };
        serde_json::from_value(value.clone()).map_err(AppError::from)
    }
}

/// Row filter applied to a change-feed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum RowFilter {
    /// Deliver all events for the table.
    Any,
    /// Deliver only events whose row has the given `case_id`.
    CaseId(Uuid),
}

impl RowFilter {
    /// Returns whether an event passes this filter.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        match self {
            Self::Any => true,
            Self::CaseId(case_id) => event.case_id() == Some(*case_id),
        }
    }
}

/// Ephemeral signal on the presence channel.
///
/// Distinct from the row-level change feed: presence carries no row payload,
/// only a signal that the roster should be re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresenceSignal {
    /// Roster membership or status changed; subscribers should refetch.
    Sync,
}

fn extract_uuid(row: &serde_json::Value, key: &str) -> Option<Uuid> {
    row.get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_roundtrip() {
        for name in [
            "cases",
            "case_history",
            "case_collaborators",
            "agents",
            "documents",
            "notifications",
            "chat_messages",
        ] {
            let table = Table::parse(name).unwrap();
            assert_eq!(table.as_str(), name);
        }
        assert!(Table::parse("users").is_none());
    }

    #[test]
    fn test_case_id_filter() {
        let case_id = Uuid::new_v4();
        let event = ChangeEvent::Inserted {
            new: serde_json::json!({ "id": Uuid::new_v4(), "case_id": case_id }),
        };
        assert!(RowFilter::CaseId(case_id).matches(&event));
        assert!(!RowFilter::CaseId(Uuid::new_v4()).matches(&event));
        assert!(RowFilter::Any.matches(&event));
    }

    #[test]
    fn test_row_id_from_insert_payload() {
        let id = Uuid::new_v4();
        let event = ChangeEvent::Inserted {
            new: serde_json::json!({ "id": id }),
        };
        assert_eq!(event.row_id(), Some(id));
    }
}
