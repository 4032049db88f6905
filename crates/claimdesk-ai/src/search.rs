//! Semantic document search via the chat gateway.
//!
//! The caller supplies the full candidate list; the model is asked for a
//! strict-JSON ranking. The model's output is validated here: unknown ids
//! are dropped and relevance scores are clamped to [0, 1] before anything
//! reaches the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;

use crate::gateway::{ChatTurn, GatewayClient};

/// Searchable fields of one candidate document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDocument {
    /// Document id, echoed back in results.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Library category.
    pub category: String,
    /// Blob URL, passed through for the result view.
    pub file_url: String,
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDocument {
    /// Candidate document id.
    pub id: Uuid,
    /// Relevance in [0, 1].
    pub relevance_score: f64,
    /// Natural-language reason the document matched.
    pub explanation: String,
}

/// The full search response: ranked subset plus an overall summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSearchOutcome {
    /// Ranked hits, best first.
    pub results: Vec<RankedDocument>,
    /// One-paragraph summary of what was found.
    #[serde(default)]
    pub summary: String,
}

fn ranking_prompt(query: &str, documents: &[CandidateDocument]) -> AppResult<String> {
    let catalog = serde_json::to_string_pretty(documents)?;
    Ok(format!(
        "You are a document search engine for an insurance claims team. Given a query and a \
         document catalog, return the documents relevant to the query, ranked best first.\n\n\
         Query: {query}\n\nDocument catalog (JSON):\n{catalog}\n\n\
         Respond with JSON only, no prose and no code fences, in exactly this shape:\n\
         {{\"results\": [{{\"id\": \"<document id>\", \"relevance_score\": <number 0..1>, \
         \"explanation\": \"<one sentence>\"}}], \"summary\": \"<one short paragraph>\"}}\n\
         Omit documents that are not relevant."
    ))
}

/// Strips a Markdown code fence if the model wrapped its JSON in one.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

fn parse_outcome(
    raw: &str,
    documents: &[CandidateDocument],
) -> AppResult<DocumentSearchOutcome> {
    let mut outcome: DocumentSearchOutcome = serde_json::from_str(strip_fences(raw))
        .map_err(|e| {
            AppError::with_source(
                claimdesk_core::error::ErrorKind::ExternalService,
                "Search ranking was not valid JSON",
                e,
            )
        })?;

    let known: HashSet<Uuid> = documents.iter().map(|d| d.id).collect();
    outcome.results.retain(|r| known.contains(&r.id));
    for result in &mut outcome.results {
        result.relevance_score = result.relevance_score.clamp(0.0, 1.0);
    }
    Ok(outcome)
}

/// Ranks the candidate documents against a free-text query.
pub async fn rank(
    gateway: &GatewayClient,
    query: &str,
    documents: &[CandidateDocument],
) -> AppResult<DocumentSearchOutcome> {
    if documents.is_empty() {
        return Ok(DocumentSearchOutcome {
            results: Vec::new(),
            summary: String::new(),
        });
    }

    let prompt = ranking_prompt(query, documents)?;
    let raw = gateway
        .complete(&[ChatTurn::user(prompt)])
        .await?
        .ok_or_else(|| AppError::external_service("Search ranking returned no content"))?;
    parse_outcome(&raw, documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> CandidateDocument {
        CandidateDocument {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            category: "Policies".to_string(),
            file_url: "https://example.com/doc.pdf".to_string(),
        }
    }

    #[test]
    fn test_parse_drops_unknown_ids() {
        let docs = vec![candidate("CA Auto Policy")];
        let raw = format!(
            r#"{{"results":[{{"id":"{}","relevance_score":0.9,"explanation":"matches"}},
                {{"id":"{}","relevance_score":0.8,"explanation":"hallucinated"}}],
                "summary":"one match"}}"#,
            docs[0].id,
            Uuid::new_v4(),
        );
        let outcome = parse_outcome(&raw, &docs).unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].id, docs[0].id);
        assert_eq!(outcome.summary, "one match");
    }

    #[test]
    fn test_parse_clamps_scores() {
        let docs = vec![candidate("A"), candidate("B")];
        let raw = format!(
            r#"{{"results":[{{"id":"{}","relevance_score":1.7,"explanation":"x"}},
                {{"id":"{}","relevance_score":-0.3,"explanation":"y"}}],"summary":""}}"#,
            docs[0].id, docs[1].id,
        );
        let outcome = parse_outcome(&raw, &docs).unwrap();
        assert_eq!(outcome.results[0].relevance_score, 1.0);
        assert_eq!(outcome.results[1].relevance_score, 0.0);
    }

    #[test]
    fn test_parse_tolerates_code_fences() {
        let docs = vec![candidate("A")];
        let raw = format!(
            "```json\n{{\"results\":[{{\"id\":\"{}\",\"relevance_score\":0.5,\
             \"explanation\":\"ok\"}}],\"summary\":\"s\"}}\n```",
            docs[0].id,
        );
        let outcome = parse_outcome(&raw, &docs).unwrap();
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let docs = vec![candidate("A")];
        let err = parse_outcome("Here are your results!", &docs).unwrap_err();
        assert_eq!(
            err.kind,
            claimdesk_core::error::ErrorKind::ExternalService
        );
    }

    #[test]
    fn test_prompt_carries_query_and_catalog() {
        let docs = vec![candidate("CA Auto Policy")];
        let prompt = ranking_prompt("rear-end collision coverage", &docs).unwrap();
        assert!(prompt.contains("rear-end collision coverage"));
        assert!(prompt.contains("CA Auto Policy"));
        assert!(prompt.contains("relevance_score"));
    }
}
