//! Notification domain entities.

pub mod model;

pub use model::{Notification, NotificationKind};
