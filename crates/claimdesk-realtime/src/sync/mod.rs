//! Synchronization state for the dashboard surfaces.
//!
//! Each sync type holds a disposable local cache of one backend
//! collection, merges change-feed events into it, and falls back to a
//! full refetch whenever the incremental path cannot be trusted.

pub mod backend;
pub mod case_list;
pub mod collaborators;
pub mod notifications;
pub mod team;
