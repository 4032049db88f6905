//! # claimdesk-ai
//!
//! Client for the hosted LLM gateway and the vision document-QA backend.
//! Three operations, each a single request/response with no local state:
//!
//! - Chat completion with optional case context
//! - Document semantic search (ranked subset with explanations)
//! - Document question-answering with a vision-primary, LLM-fallback chain
//!
//! Gateway failures are mapped to [`claimdesk_core::error::AppError`] kinds
//! at this boundary; 429 and 402 keep their identity, everything else
//! collapses to an external-service error.

pub mod chat;
pub mod docqa;
pub mod gateway;
pub mod search;

pub use chat::CaseContext;
pub use docqa::{AnswerSource, DocQaAnswer, DocQaClient};
pub use gateway::{ChatRole, ChatTurn, GatewayClient};
pub use search::{CandidateDocument, DocumentSearchOutcome, RankedDocument};
