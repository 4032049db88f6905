//! Conversational AI assistant with persisted history.

pub mod service;

pub use service::ChatService;
