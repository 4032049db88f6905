//! Knowledge-base articles and query history.

pub mod service;

pub use service::KnowledgeService;
