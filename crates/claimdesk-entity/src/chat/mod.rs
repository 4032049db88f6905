//! Chat domain entities.

pub mod model;

pub use model::{ChatConversation, ChatMessage, MessageRole};
