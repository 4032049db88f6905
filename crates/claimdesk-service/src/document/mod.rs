//! Document library and semantic search.

pub mod service;

pub use service::{DocumentSearchResult, DocumentService, SearchHit};
