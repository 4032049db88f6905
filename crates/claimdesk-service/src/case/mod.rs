//! Case lifecycle and audit trail.

pub mod service;
pub mod store;

pub use service::{CaseService, CaseStats};
pub use store::{CaseAuditStore, CaseStore};
