//! Change-feed hub and subscription handles.

pub mod hub;
pub mod subscription;
