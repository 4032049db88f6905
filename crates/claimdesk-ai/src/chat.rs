//! Case-aware chat completion.

use serde::{Deserialize, Serialize};

use claimdesk_core::result::AppResult;

use crate::gateway::{ChatTurn, GatewayClient};

/// Claim type treated as "no specific case": context carrying it is not
/// interpolated into the system instruction.
pub const GENERAL_CLAIM_TYPE: &str = "General";

/// Placeholder returned when the gateway answers without content.
const EMPTY_COMPLETION_FALLBACK: &str = "I couldn't process that request. Please try again.";

/// Case fields interpolated into the assistant's system instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseContext {
    /// Claim type; the literal "General" disables interpolation.
    pub claim_type: String,
    /// US state the claim was filed in.
    pub state: String,
    /// Claimed amount, preformatted for display.
    pub claim_amount: String,
    /// Policy number.
    pub policy_number: String,
    /// Policy holder name.
    pub customer_name: String,
    /// Incident date, preformatted for display.
    pub date_of_incident: String,
    /// Incident description.
    pub description: String,
}

impl CaseContext {
    fn is_general(&self) -> bool {
        self.claim_type == GENERAL_CLAIM_TYPE
    }
}

/// Builds the system instruction, appending case context when present and
/// not the "General" sentinel.
pub fn system_prompt(context: Option<&CaseContext>) -> String {
    let mut prompt = String::from(
        "You are KnowledgeIQ, an expert AI assistant for insurance claims management. You help agents with:\n\
         - Insurance policies, regulations, and compliance\n\
         - Claims processing procedures\n\
         - State-specific insurance laws\n\
         - Coverage analysis and recommendations\n\
         - Best practices for claims handling\n\n\
         Always provide accurate, helpful, and detailed responses. When relevant, cite regulations, \
         policy sections, or procedural guidelines. Be conversational but professional.",
    );

    if let Some(context) = context.filter(|c| !c.is_general()) {
        prompt.push_str(&format!(
            "\n\nCurrent Case Context:\n\
             - Claim Type: {}\n\
             - State: {}\n\
             - Claim Amount: {}\n\
             - Policy Number: {}\n\
             - Customer: {}\n\
             - Date of Incident: {}\n\
             - Description: {}\n\n\
             Use this context to provide relevant and specific guidance.",
            context.claim_type,
            context.state,
            context.claim_amount,
            context.policy_number,
            context.customer_name,
            context.date_of_incident,
            context.description,
        ));
    }

    prompt
}

/// Runs one chat completion: system instruction + conversation history.
pub async fn complete(
    gateway: &GatewayClient,
    history: &[ChatTurn],
    context: Option<&CaseContext>,
) -> AppResult<String> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatTurn::system(system_prompt(context)));
    messages.extend_from_slice(history);

    let content = gateway.complete(&messages).await?;
    Ok(content.unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(claim_type: &str) -> CaseContext {
        CaseContext {
            claim_type: claim_type.to_string(),
            state: "CA".to_string(),
            claim_amount: "$12,000".to_string(),
            policy_number: "POL-4411".to_string(),
            customer_name: "Alice Moran".to_string(),
            date_of_incident: "2026-07-14".to_string(),
            description: "Rear-end collision on I-5".to_string(),
        }
    }

    #[test]
    fn test_prompt_without_context_has_no_case_block() {
        let prompt = system_prompt(None);
        assert!(prompt.starts_with("You are KnowledgeIQ"));
        assert!(!prompt.contains("Current Case Context"));
    }

    #[test]
    fn test_prompt_with_context_interpolates_fields() {
        let ctx = context("Auto");
        let prompt = system_prompt(Some(&ctx));
        assert!(prompt.contains("Current Case Context"));
        assert!(prompt.contains("- Claim Type: Auto"));
        assert!(prompt.contains("- Policy Number: POL-4411"));
        assert!(prompt.contains("- Customer: Alice Moran"));
    }

    #[test]
    fn test_general_claim_type_skips_context() {
        let ctx = context(GENERAL_CLAIM_TYPE);
        let prompt = system_prompt(Some(&ctx));
        assert!(!prompt.contains("Current Case Context"));
        assert_eq!(prompt, system_prompt(None));
    }

    #[test]
    fn test_case_context_uses_camel_case_wire_names() {
        let ctx = context("Auto");
        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json.get("claimType").is_some());
        assert!(json.get("dateOfIncident").is_some());
        assert!(json.get("claim_type").is_none());
    }
}
