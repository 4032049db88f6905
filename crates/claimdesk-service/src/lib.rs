//! # claimdesk-service
//!
//! Business logic for ClaimDesk. Services orchestrate the repositories,
//! the change-feed hub, and the AI clients: every write goes to the
//! database first, then fans out as a change event so all open sessions
//! converge on the new state.

pub mod agent;
pub mod case;
pub mod chat;
pub mod collaborator;
pub mod document;
pub mod knowledge;
pub mod notification;

pub use agent::AgentService;
pub use case::CaseService;
pub use chat::ChatService;
pub use collaborator::CollaboratorService;
pub use document::{DocumentSearchResult, DocumentService, SearchHit};
pub use knowledge::KnowledgeService;
pub use notification::NotificationService;
