//! Chat repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::chat::{ChatConversation, ChatMessage, MessageRole};

/// Repository for chat conversations and messages.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List conversations, most recently touched first.
    pub async fn find_conversations(&self) -> AppResult<Vec<ChatConversation>> {
        sqlx::query_as::<_, ChatConversation>(
            "SELECT * FROM chat_conversations ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list conversations", e))
    }

    /// Find a conversation by id.
    pub async fn find_conversation(
        &self,
        conversation_id: Uuid,
    ) -> AppResult<Option<ChatConversation>> {
        sqlx::query_as::<_, ChatConversation>("SELECT * FROM chat_conversations WHERE id = $1")
            .bind(conversation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find conversation", e)
            })
    }

    /// Create a conversation, optionally pinned to a case.
    pub async fn create_conversation(
        &self,
        title: &str,
        case_id: Option<Uuid>,
    ) -> AppResult<ChatConversation> {
        sqlx::query_as::<_, ChatConversation>(
            "INSERT INTO chat_conversations (title, case_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(title)
        .bind(case_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create conversation", e)
        })
    }

    /// Rename a conversation.
    pub async fn rename_conversation(
        &self,
        conversation_id: Uuid,
        title: &str,
    ) -> AppResult<Option<ChatConversation>> {
        sqlx::query_as::<_, ChatConversation>(
            "UPDATE chat_conversations SET title = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(conversation_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rename conversation", e)
        })
    }

    /// List a conversation's messages in chronological order.
    pub async fn find_messages(&self, conversation_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            "SELECT * FROM chat_messages WHERE conversation_id = $1 ORDER BY created_at ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Append a message and touch the parent conversation.
    pub async fn append_message(
        &self,
        conversation_id: Uuid,
        role: MessageRole,
        content: &str,
    ) -> AppResult<ChatMessage> {
        let message = sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (conversation_id, role, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(conversation_id)
        .bind(role)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append message", e))?;

        sqlx::query("UPDATE chat_conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch conversation", e)
            })?;

        Ok(message)
    }

    /// Delete a conversation and its messages (cascade).
    pub async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM chat_conversations WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete conversation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
