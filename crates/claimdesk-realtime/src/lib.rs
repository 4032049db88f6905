//! # claimdesk-realtime
//!
//! Realtime collaboration layer for ClaimDesk. Provides:
//!
//! - The in-process change-feed hub: per-table broadcast channels carrying
//!   row-level insert/update/delete events
//! - A presence channel for ephemeral roster signals, distinct from the
//!   row-level feed
//! - Synchronization state for the dashboard surfaces: notification panel
//!   (incremental merge with refetch recovery), case list (convergent
//!   refetch), per-case collaborator presence, and the team roster
//!
//! Every local collection here is a disposable cache: the database is the
//! single source of truth, and any handler's refetch restores ground truth
//! regardless of event ordering across subscriptions.

pub mod feed;
pub mod sync;

pub use feed::hub::ChangeFeedHub;
pub use feed::subscription::{FeedMessage, FeedSubscription, PresenceSubscription};
pub use sync::case_list::CaseListSync;
pub use sync::collaborators::{AvatarStack, CollaboratorSync};
pub use sync::notifications::NotificationSync;
pub use sync::team::TeamPresenceSync;
