//! Request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use claimdesk_ai::{CaseContext, ChatTurn};
use claimdesk_entity::agent::AgentStatus;
use claimdesk_entity::case::{CasePriority, CaseStatus};
use claimdesk_entity::document::DocumentStatus;
use claimdesk_entity::notification::NotificationKind;

/// POST /api/cases
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCaseRequest {
    /// Policy holder name.
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    /// Policy number.
    #[validate(length(min = 1, max = 50))]
    pub policy_number: String,
    /// Claim type.
    #[validate(length(min = 1, max = 100))]
    pub claim_type: String,
    /// US state. Full names and two-letter codes both occur in the data.
    #[validate(length(min = 2, max = 100))]
    pub state: String,
    /// Claimed amount in dollars.
    #[validate(range(min = 0.0))]
    pub claim_amount: f64,
    /// Incident date.
    pub date_of_incident: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Triage priority.
    pub priority: CasePriority,
    /// Assigned agent, if any.
    pub assigned_to: Option<Uuid>,
    /// Who filed the case (audit trail attribution).
    pub performed_by: Option<String>,
}

/// PUT /api/cases/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCaseRequest {
    /// New workflow status.
    pub status: Option<CaseStatus>,
    /// New triage priority.
    pub priority: Option<CasePriority>,
    /// New description.
    pub description: Option<String>,
    /// New assignee.
    pub assigned_to: Option<Uuid>,
    /// Who made the change (audit trail attribution).
    pub performed_by: Option<String>,
}

/// POST /api/cases/{id}/history
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordActivityRequest {
    /// Audit action label.
    #[validate(length(min = 1, max = 100))]
    pub action: String,
    /// Optional details.
    pub details: Option<String>,
    /// Who performed the action.
    pub performed_by: Option<String>,
}

/// POST /api/documents
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    /// Display title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Original file name.
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    /// MIME type.
    #[validate(length(min = 1, max = 100))]
    pub file_type: String,
    /// File size in bytes.
    #[validate(range(min = 0))]
    pub file_size: i64,
    /// Blob storage URL.
    #[validate(length(min = 1, max = 2000))]
    pub file_url: String,
    /// Library category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Who uploaded the document.
    pub uploaded_by: Option<String>,
}

/// PUT /api/documents/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct SetDocumentStatusRequest {
    /// New indexing status.
    pub status: DocumentStatus,
}

/// POST /api/notifications
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Short title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    /// Severity/intent.
    pub kind: NotificationKind,
    /// Optional in-app link target.
    pub link: Option<String>,
}

/// POST /api/chat/conversations
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversationRequest {
    /// Initial title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Case providing context, if any.
    pub case_id: Option<Uuid>,
}

/// POST /api/chat/conversations/{id}/messages
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// User message text.
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

/// POST /api/ai/chat. Stateless proxy, mirrors the browser call shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiChatRequest {
    /// Ordered conversation turns.
    pub messages: Vec<ChatTurn>,
    /// Optional case context.
    #[serde(rename = "caseContext")]
    pub case_context: Option<CaseContext>,
}

/// POST /api/ai/documents/search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentSearchRequest {
    /// Free-text query.
    #[validate(length(min = 1, max = 500))]
    pub query: String,
}

/// POST /api/ai/documents/qa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentQaRequest {
    /// Document blob URL.
    pub url: String,
    /// Question about the document.
    pub question: String,
}

/// PUT /api/agents/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct SetAgentStatusRequest {
    /// New presence status.
    pub status: AgentStatus,
}

/// POST /api/cases/{id}/collaborators
#[derive(Debug, Clone, Deserialize)]
pub struct JoinCaseRequest {
    /// The joining agent.
    pub agent_id: Uuid,
}

/// PUT /api/cases/{id}/collaborators/{agent_id}
#[derive(Debug, Clone, Deserialize)]
pub struct TouchCollaboratorRequest {
    /// Opaque cursor/selection state.
    pub cursor_position: Option<serde_json::Value>,
}

/// POST /api/knowledge/queries
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogQueryRequest {
    /// The query text.
    #[validate(length(min = 1, max = 1000))]
    pub query: String,
    /// Case the query concerned, if any.
    pub case_id: Option<Uuid>,
    /// The response shown to the agent.
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_case_request_accepts_complete_payload() {
        let req: CreateCaseRequest = serde_json::from_value(serde_json::json!({
            "customer_name": "Jane Doe",
            "policy_number": "POL-2024-789",
            "claim_type": "Property",
            "state": "Texas",
            "claim_amount": 15000.0,
            "date_of_incident": "2026-06-01",
            "priority": "high",
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.customer_name, "Jane Doe");
        assert!(req.description.is_none());
    }

    #[test]
    fn test_create_case_request_accepts_state_names_and_codes() {
        for state in ["TX", "Texas", "North Carolina"] {
            let req: CreateCaseRequest = serde_json::from_value(serde_json::json!({
                "customer_name": "Jane Doe",
                "policy_number": "POL-2024-789",
                "claim_type": "Property",
                "state": state,
                "claim_amount": 15000.0,
                "date_of_incident": "2026-06-01",
                "priority": "high",
            }))
            .unwrap();
            assert!(req.validate().is_ok(), "state {state:?} should validate");
        }
    }

    #[test]
    fn test_create_case_request_rejects_blank_name() {
        let req: CreateCaseRequest = serde_json::from_value(serde_json::json!({
            "customer_name": "",
            "policy_number": "POL-2024-789",
            "claim_type": "Property",
            "state": "TX",
            "claim_amount": 15000.0,
            "date_of_incident": "2026-06-01",
            "priority": "high",
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_case_request_fields_are_optional() {
        let req: UpdateCaseRequest = serde_json::from_value(serde_json::json!({
            "status": "approved",
        }))
        .unwrap();
        assert_eq!(req.status, Some(CaseStatus::Approved));
        assert!(req.priority.is_none());
    }

    #[test]
    fn test_ai_chat_request_uses_camel_case_context_key() {
        let req: AiChatRequest = serde_json::from_value(serde_json::json!({
            "messages": [{ "role": "user", "content": "hello" }],
            "caseContext": {
                "claimType": "Auto",
                "state": "CA",
                "claimAmount": "$1200.00",
                "policyNumber": "POL-1",
                "customerName": "Alice Moran",
                "dateOfIncident": "2026-01-05",
                "description": "N/A",
            },
        }))
        .unwrap();
        assert!(req.case_context.is_some());
    }
}
