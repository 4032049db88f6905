//! # claimdesk-core
//!
//! Core crate for ClaimDesk. Contains configuration schemas, the unified
//! error system, and change-feed event types.
//!
//! This crate has **no** internal dependencies on other ClaimDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
