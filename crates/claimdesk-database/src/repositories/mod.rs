//! Concrete repository implementations, one per entity.

pub mod agent;
pub mod case;
pub mod chat;
pub mod collaborator;
pub mod document;
pub mod history;
pub mod knowledge;
pub mod notification;

pub use agent::AgentRepository;
pub use case::{CaseRepository, CaseUpdate, NewCase};
pub use chat::ChatRepository;
pub use collaborator::CollaboratorRepository;
pub use document::{DocumentRepository, NewDocument};
pub use history::CaseHistoryRepository;
pub use knowledge::KnowledgeRepository;
pub use notification::NotificationRepository;
