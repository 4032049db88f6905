//! Chat conversation and message entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Author role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "message_role", rename_all = "snake_case")]
pub enum MessageRole {
    /// Written by the agent.
    User,
    /// Produced by the AI assistant.
    Assistant,
}

impl MessageRole {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A chat conversation, optionally pinned to a case for context.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatConversation {
    /// Unique conversation identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// The case providing context, if any.
    pub case_id: Option<Uuid>,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
    /// When the conversation last received a message.
    pub updated_at: DateTime<Utc>,
}

/// One message within a conversation. Messages are ordered by
/// `created_at` ascending.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// The conversation this message belongs to.
    pub conversation_id: Uuid,
    /// Author role.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}
