//! Per-case collaborator presence.

pub mod service;

pub use service::CollaboratorService;
