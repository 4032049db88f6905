//! Document question-answering.
//!
//! Primary path is a specialized vision-QA backend that reads the document
//! image directly. When it fails for any reason, the chat gateway is asked
//! to analyze the document instead, and page/section references are
//! extracted from its free-text answer. The two paths are distinguished by
//! a source tag so callers can display provenance.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use claimdesk_core::config::AiConfig;
use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;

use crate::gateway::{ChatTurn, GatewayClient};

static PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Pp]age\s*(\d+)").unwrap());
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ss]ection\s*([A-Za-z0-9.]+)").unwrap());

/// Which backend produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// The vision document-QA backend.
    Docvqa,
    /// The chat-gateway fallback.
    AiAnalysis,
}

/// An answer to a document question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocQaAnswer {
    /// Answer text.
    pub answer: String,
    /// Best-effort page reference.
    pub page_number: Option<u32>,
    /// Best-effort section reference.
    pub section: Option<String>,
    /// Model confidence in [0, 1], when the backend reports one.
    pub confidence: Option<f64>,
    /// Which backend answered.
    pub source: AnswerSource,
}

#[derive(Debug, Serialize)]
struct VisionRequest<'a> {
    url: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct VisionResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Client for the vision-primary, LLM-fallback document-QA chain.
#[derive(Debug, Clone)]
pub struct DocQaClient {
    http: reqwest::Client,
    gateway: GatewayClient,
    config: AiConfig,
}

impl DocQaClient {
    /// Creates a document-QA client sharing the gateway configuration.
    pub fn new(config: AiConfig, gateway: GatewayClient) -> AppResult<Self> {
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
        Ok(Self {
            http,
            gateway,
            config,
        })
    }

    /// Answers a question about a document identified by URL.
    ///
    /// Never panics across this boundary: the worst outcome is an
    /// external-service error the API layer turns into `{error}`.
    pub async fn answer(&self, url: &str, question: &str) -> AppResult<DocQaAnswer> {
        if url.trim().is_empty() || question.trim().is_empty() {
            return Err(AppError::validation("URL and question are required"));
        }

        match self.ask_vision(url, question).await {
            Ok(answer) => Ok(answer),
            Err(primary) => {
                tracing::warn!(error = %primary, "Vision QA failed, falling back to gateway");
                self.ask_gateway(url, question).await.map_err(|fallback| {
                    tracing::error!(error = %fallback, "Document QA fallback failed");
                    AppError::external_service("Failed to process document")
                })
            }
        }
    }

    async fn ask_vision(&self, url: &str, question: &str) -> AppResult<DocQaAnswer> {
        let response = self
            .http
            .post(&self.config.docqa_url)
            .bearer_auth(&self.config.docqa_api_key)
            .json(&VisionRequest { url, question })
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    claimdesk_core::error::ErrorKind::ExternalService,
                    "Vision QA request failed",
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body, "Vision QA error");
            return Err(AppError::external_service("Vision QA error"));
        }

        let data: VisionResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                claimdesk_core::error::ErrorKind::ExternalService,
                "Vision QA returned malformed JSON",
                e,
            )
        })?;

        Ok(DocQaAnswer {
            answer: data
                .output
                .or(data.answer)
                .unwrap_or_else(|| "No answer found".to_string()),
            page_number: data.page_number,
            section: data.section,
            confidence: data.confidence.map(|c| c.clamp(0.0, 1.0)),
            source: AnswerSource::Docvqa,
        })
    }

    async fn ask_gateway(&self, url: &str, question: &str) -> AppResult<DocQaAnswer> {
        let messages = [
            ChatTurn::system(
                "You are a document analysis expert. Analyze the provided document URL and \
                 answer questions about it. Provide specific answers with page references where \
                 possible. Format: Answer the question, then provide \"Reference: Page X, \
                 Section Y\" if applicable.",
            ),
            ChatTurn::user(format!(
                "Document URL: {url}\n\nQuestion: {question}\n\nPlease analyze this document \
                 and answer the question with page/section references."
            )),
        ];

        let answer = self
            .gateway
            .complete(&messages)
            .await?
            .unwrap_or_else(|| "Unable to analyze document".to_string());

        let (page_number, section) = extract_references(&answer);
        Ok(DocQaAnswer {
            answer,
            page_number,
            section,
            confidence: None,
            source: AnswerSource::AiAnalysis,
        })
    }
}

/// Pulls the first page and section references out of a free-text answer.
fn extract_references(answer: &str) -> (Option<u32>, Option<String>) {
    let page = PAGE_RE
        .captures(answer)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok());
    let section = SECTION_RE
        .captures(answer)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    (page, section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_page_and_section() {
        let (page, section) =
            extract_references("The deductible is $500. Reference: Page 12, Section 4.2");
        assert_eq!(page, Some(12));
        assert_eq!(section.as_deref(), Some("4.2"));
    }

    #[test]
    fn test_extract_is_case_insensitive_on_first_letter() {
        let (page, section) = extract_references("see page 3, section B");
        assert_eq!(page, Some(3));
        assert_eq!(section.as_deref(), Some("B"));
    }

    #[test]
    fn test_extract_absent_references() {
        let (page, section) = extract_references("The policy covers water damage.");
        assert_eq!(page, None);
        assert_eq!(section, None);
    }

    #[test]
    fn test_source_tags_on_the_wire() {
        assert_eq!(
            serde_json::to_value(AnswerSource::Docvqa).unwrap(),
            "docvqa"
        );
        assert_eq!(
            serde_json::to_value(AnswerSource::AiAnalysis).unwrap(),
            "ai_analysis"
        );
    }

    #[test]
    fn test_vision_response_prefers_output_field() {
        let data: VisionResponse =
            serde_json::from_str(r#"{"output":"from output","answer":"from answer"}"#).unwrap();
        assert_eq!(data.output.or(data.answer).as_deref(), Some("from output"));
    }
}
