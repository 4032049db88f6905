//! Notification CRUD with change-feed fan-out.

pub mod service;

pub use service::NotificationService;
