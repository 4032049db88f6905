//! Subscription handles for the change feed and presence channel.

use tokio::sync::broadcast;
use tracing::warn;

use claimdesk_core::events::{ChangeEvent, PresenceSignal, RowFilter, Table};

/// A message delivered to a change-feed subscriber.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// A row-level change event that passed the subscription filter.
    Event(ChangeEvent),
    /// The subscriber fell behind and `skipped` events were dropped.
    /// The local view is stale; recover with a full refetch.
    Lagged(u64),
}

/// A live subscription to one table's change feed.
///
/// Dropping the handle releases the underlying channel registration;
/// acquire on mount, drop on unmount.
#[derive(Debug)]
pub struct FeedSubscription {
    table: Table,
    filter: RowFilter,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl FeedSubscription {
    pub(crate) fn new(
        table: Table,
        filter: RowFilter,
        receiver: broadcast::Receiver<ChangeEvent>,
    ) -> Self {
        Self {
            table,
            filter,
            receiver,
        }
    }

    /// The table this subscription watches.
    pub fn table(&self) -> Table {
        self.table
    }

    /// The row filter applied to delivered events.
    pub fn filter(&self) -> RowFilter {
        self.filter
    }

    /// Receives the next message, skipping events that do not pass the
    /// filter. Returns `None` once the hub side is gone.
    pub async fn recv(&mut self) -> Option<FeedMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        return Some(FeedMessage::Event(event));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        table = self.table.as_str(),
                        skipped, "Change-feed subscriber lagged"
                    );
                    return Some(FeedMessage::Lagged(skipped));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// A live subscription to the presence channel.
#[derive(Debug)]
pub struct PresenceSubscription {
    receiver: broadcast::Receiver<PresenceSignal>,
}

impl PresenceSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<PresenceSignal>) -> Self {
        Self { receiver }
    }

    /// Receives the next presence signal. A lagged receiver collapses to
    /// a single `Sync`, which is lossless here: the only reaction to any
    /// number of signals is one refetch.
    pub async fn recv(&mut self) -> Option<PresenceSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                Err(broadcast::error::RecvError::Lagged(_)) => return Some(PresenceSignal::Sync),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
