//! Agent entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Presence status of an agent. Mutated by the presence subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "agent_status", rename_all = "snake_case")]
pub enum AgentStatus {
    /// Connected and recently active.
    Online,
    /// Connected but idle.
    Away,
    /// Not connected.
    Offline,
}

impl AgentStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }
}

/// A claims agent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agent {
    /// Unique agent identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Hex color used for the avatar fallback.
    pub avatar_color: String,
    /// Current presence status.
    pub status: AgentStatus,
    /// Last time this agent was seen active.
    pub last_seen: DateTime<Utc>,
    /// When the agent record was created.
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Initials shown in the avatar fallback ("Jane Doe" → "JD").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn agent(name: &str) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: "a@example.com".to_string(),
            avatar_color: "#6366f1".to_string(),
            status: AgentStatus::Online,
            last_seen: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(agent("Jane Doe").initials(), "JD");
        assert_eq!(agent("Cher").initials(), "C");
        assert_eq!(agent("").initials(), "");
    }
}
