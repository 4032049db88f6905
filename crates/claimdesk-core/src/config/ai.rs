//! AI gateway configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the hosted LLM gateway and the vision document-QA
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Base URL of the OpenAI-compatible chat-completions gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// API key for the gateway.
    #[serde(default)]
    pub gateway_api_key: String,
    /// Model identifier sent to the gateway.
    #[serde(default = "default_model")]
    pub model: String,
    /// URL of the vision document-QA backend (primary path for document QA).
    #[serde(default = "default_docqa_url")]
    pub docqa_url: String,
    /// API key for the vision document-QA backend.
    #[serde(default)]
    pub docqa_api_key: String,
    /// Request timeout in seconds for all AI calls.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Sampling temperature for chat completions.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum completion tokens for chat completions.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_gateway_url() -> String {
    "https://ai.gateway.lovable.dev/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_docqa_url() -> String {
    "https://api.bytez.com/model/v1/naver-clova-ix/donut-base-finetuned-docvqa/run".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}
