//! # claimdesk-entity
//!
//! Domain entity models for ClaimDesk. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Enum-valued columns (case status/priority, agent status, document
//! status, notification type, chat role) are typed Rust enums backed by
//! Postgres enum types, so malformed rows fail at the decode boundary
//! instead of propagating as loose strings.

pub mod agent;
pub mod case;
pub mod chat;
pub mod collaborator;
pub mod document;
pub mod knowledge;
pub mod notification;
