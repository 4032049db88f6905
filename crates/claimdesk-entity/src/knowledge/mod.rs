//! Knowledge-base domain entities.

pub mod model;

pub use model::{KnowledgeArticle, KnowledgeQuery};
