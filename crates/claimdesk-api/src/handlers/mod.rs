//! Route handlers organized by domain.

pub mod agent;
pub mod ai;
pub mod case;
pub mod chat;
pub mod collaborator;
pub mod document;
pub mod health;
pub mod knowledge;
pub mod notification;
pub mod ws;
