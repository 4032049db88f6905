//! Chat conversations: persisted history around gateway completions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use claimdesk_ai::{CaseContext, ChatTurn, GatewayClient};
use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{CaseRepository, ChatRepository};
use claimdesk_entity::case::Case;
use claimdesk_entity::chat::{ChatConversation, ChatMessage, MessageRole};
use claimdesk_realtime::ChangeFeedHub;

/// Conversations are retitled from the first user message, truncated here.
const TITLE_MAX_CHARS: usize = 50;

/// Manages chat conversations and runs completions against the gateway.
#[derive(Debug, Clone)]
pub struct ChatService {
    /// Conversation and message repository.
    chat_repo: Arc<ChatRepository>,
    /// Case repository, for conversations pinned to a case.
    case_repo: Arc<CaseRepository>,
    /// Gateway client.
    gateway: Arc<GatewayClient>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        chat_repo: Arc<ChatRepository>,
        case_repo: Arc<CaseRepository>,
        gateway: Arc<GatewayClient>,
        hub: Arc<ChangeFeedHub>,
    ) -> Self {
        Self {
            chat_repo,
            case_repo,
            gateway,
            hub,
        }
    }

    /// Lists conversations, most recently touched first.
    pub async fn list_conversations(&self) -> AppResult<Vec<ChatConversation>> {
        self.chat_repo.find_conversations().await
    }

    /// Creates a conversation, optionally pinned to a case.
    pub async fn create_conversation(
        &self,
        title: &str,
        case_id: Option<Uuid>,
    ) -> AppResult<ChatConversation> {
        if let Some(case_id) = case_id {
            if self.case_repo.find_by_id(case_id).await?.is_none() {
                return Err(AppError::not_found(format!("Case {case_id} not found")));
            }
        }
        self.chat_repo.create_conversation(title, case_id).await
    }

    /// Lists a conversation's messages in chronological order.
    pub async fn messages(&self, conversation_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        self.conversation(conversation_id).await?;
        self.chat_repo.find_messages(conversation_id).await
    }

    /// Deletes a conversation and its messages.
    pub async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<()> {
        if !self.chat_repo.delete_conversation(conversation_id).await? {
            return Err(AppError::not_found(format!(
                "Conversation {conversation_id} not found"
            )));
        }
        Ok(())
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// The user turn is persisted before the gateway call, so a gateway
    /// failure leaves the question in the history and the caller may retry.
    /// The first message of a conversation also becomes its title.
    pub async fn send_message(
        &self,
        conversation_id: Uuid,
        content: &str,
    ) -> AppResult<ChatMessage> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message content must not be empty"));
        }
        let conversation = self.conversation(conversation_id).await?;
        let prior = self.chat_repo.find_messages(conversation_id).await?;

        let user_message = self
            .chat_repo
            .append_message(conversation_id, MessageRole::User, content)
            .await?;
        self.hub
            .publish(Table::ChatMessages, ChangeEvent::inserted(&user_message)?);

        if prior.is_empty() {
            let title: String = content.chars().take(TITLE_MAX_CHARS).collect();
            self.chat_repo
                .rename_conversation(conversation_id, &title)
                .await?;
        }

        let context = match conversation.case_id {
            Some(case_id) => self.case_repo.find_by_id(case_id).await?.map(case_context),
            None => None,
        };

        let mut history: Vec<ChatTurn> = prior.iter().map(turn_from_message).collect();
        history.push(turn_from_message(&user_message));

        let reply =
            claimdesk_ai::chat::complete(&self.gateway, &history, context.as_ref()).await?;

        let assistant_message = self
            .chat_repo
            .append_message(conversation_id, MessageRole::Assistant, &reply)
            .await?;
        self.hub.publish(
            Table::ChatMessages,
            ChangeEvent::inserted(&assistant_message)?,
        );
        info!(conversation_id = %conversation_id, "Chat completion delivered");
        Ok(assistant_message)
    }

    async fn conversation(&self, conversation_id: Uuid) -> AppResult<ChatConversation> {
        self.chat_repo
            .find_conversation(conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Conversation {conversation_id} not found"))
            })
    }
}

fn turn_from_message(message: &ChatMessage) -> ChatTurn {
    match message.role {
        MessageRole::User => ChatTurn::user(message.content.clone()),
        MessageRole::Assistant => ChatTurn::assistant(message.content.clone()),
    }
}

/// Formats case fields for interpolation into the system instruction.
fn case_context(case: Case) -> CaseContext {
    CaseContext {
        claim_type: case.claim_type,
        state: case.state,
        claim_amount: format!("${:.2}", case.claim_amount),
        policy_number: case.policy_number,
        customer_name: case.customer_name,
        date_of_incident: case.date_of_incident.to_string(),
        description: case.description.unwrap_or_else(|| "N/A".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use claimdesk_entity::case::{CasePriority, CaseStatus};

    #[test]
    fn test_case_context_formatting() {
        let case = Case {
            id: Uuid::new_v4(),
            customer_name: "Alice Moran".to_string(),
            policy_number: "POL-4411".to_string(),
            claim_type: "Auto".to_string(),
            state: "CA".to_string(),
            claim_amount: 12000.5,
            date_of_incident: chrono::NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
            description: None,
            status: CaseStatus::Open,
            priority: CasePriority::High,
            assigned_to: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let ctx = case_context(case);
        assert_eq!(ctx.claim_amount, "$12000.50");
        assert_eq!(ctx.date_of_incident, "2026-07-14");
        assert_eq!(ctx.description, "N/A");
    }

    #[test]
    fn test_turn_roles_map_one_to_one() {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            role: MessageRole::Assistant,
            content: "hello".to_string(),
            created_at: Utc::now(),
        };
        let turn = turn_from_message(&message);
        assert_eq!(turn.role, claimdesk_ai::ChatRole::Assistant);
        assert_eq!(turn.content, "hello");
    }
}
