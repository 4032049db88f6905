//! HTTP client for the OpenAI-compatible chat-completions gateway.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use claimdesk_core::config::AiConfig;
use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;

/// Role of one turn in a gateway conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instruction turn prepended by the server.
    System,
    /// End-user turn.
    User,
    /// Model turn.
    Assistant,
}

/// One turn sent to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced the turn.
    pub role: ChatRole,
    /// Turn text.
    pub content: String,
}

impl ChatTurn {
    /// Builds a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Builds a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Builds an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the chat-completions gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl GatewayClient {
    /// Creates a gateway client from AI configuration.
    pub fn new(config: AiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    claimdesk_core::error::ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;
        Ok(Self { http, config })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends one completion request and returns the assistant content.
    ///
    /// `None` means the gateway answered 2xx but produced no content;
    /// callers substitute their own placeholder text. 429 and 402 map to
    /// rate-limit and payment-required errors with user-facing messages;
    /// every other failure collapses to a generic external-service error
    /// (the upstream body is logged, never surfaced).
    pub async fn complete(&self, messages: &[ChatTurn]) -> AppResult<Option<String>> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(&self.config.gateway_url)
            .bearer_auth(&self.config.gateway_api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    claimdesk_core::error::ErrorKind::ExternalService,
                    "AI gateway error",
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(AppError::rate_limit(
                    "Rate limit exceeded. Please try again later.",
                ));
            }
            if status == StatusCode::PAYMENT_REQUIRED {
                return Err(AppError::payment_required(
                    "Payment required. Please add credits.",
                ));
            }
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body, "AI gateway error");
            return Err(AppError::external_service("AI gateway error"));
        }

        let data: CompletionResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                claimdesk_core::error::ErrorKind::ExternalService,
                "AI gateway returned malformed JSON",
                e,
            )
        })?;

        Ok(data.choices.into_iter().next().and_then(|c| c.message.content))
    }
}
