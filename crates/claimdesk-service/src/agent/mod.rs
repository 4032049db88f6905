//! Agent roster and presence status.

pub mod service;

pub use service::AgentService;
