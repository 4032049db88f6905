//! Change-feed hub: per-table broadcast channels plus the presence channel.

use dashmap::DashMap;
use tokio::sync::broadcast;

use claimdesk_core::events::{ChangeEvent, PresenceSignal, RowFilter, Table};

use super::subscription::{FeedSubscription, PresenceSubscription};

/// Fan-out hub for row-level change events.
///
/// Each watched table gets one broadcast channel, created lazily on first
/// use. Publishing with no subscribers is a no-op. Subscribers that fall
/// behind the channel buffer receive a lag marker and are expected to
/// recover with a full refetch.
#[derive(Debug)]
pub struct ChangeFeedHub {
    /// Table → broadcast sender.
    tables: DashMap<Table, broadcast::Sender<ChangeEvent>>,
    /// The presence channel (no row payloads, signals only).
    presence: broadcast::Sender<PresenceSignal>,
    /// Buffer size for newly created channels.
    buffer_size: usize,
}

impl ChangeFeedHub {
    /// Creates a new hub with the given per-channel buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (presence, _) = broadcast::channel(buffer_size);
        Self {
            tables: DashMap::new(),
            presence,
            buffer_size,
        }
    }

    /// Publishes a change event for a table. Returns the number of
    /// subscribers the event was delivered to.
    pub fn publish(&self, table: Table, event: ChangeEvent) -> usize {
        let sender = self
            .tables
            .entry(table)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        sender.send(event).unwrap_or(0)
    }

    /// Publishes an ephemeral presence signal.
    pub fn publish_presence(&self, signal: PresenceSignal) -> usize {
        self.presence.send(signal).unwrap_or(0)
    }

    /// Subscribes to a table's change feed with a row filter.
    ///
    /// The subscription is released when the returned handle is dropped;
    /// callers acquire on mount and drop on unmount, nothing else.
    pub fn subscribe(&self, table: Table, filter: RowFilter) -> FeedSubscription {
        let receiver = self
            .tables
            .entry(table)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe();
        FeedSubscription::new(table, filter, receiver)
    }

    /// Subscribes to the presence channel.
    pub fn subscribe_presence(&self) -> PresenceSubscription {
        PresenceSubscription::new(self.presence.subscribe())
    }

    /// Returns the current subscriber count for a table.
    pub fn subscriber_count(&self, table: Table) -> usize {
        self.tables
            .get(&table)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn insert_event(case_id: Uuid) -> ChangeEvent {
        ChangeEvent::Inserted {
            new: serde_json::json!({ "id": Uuid::new_v4(), "case_id": case_id }),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let hub = ChangeFeedHub::new(16);
        let mut sub = hub.subscribe(Table::Cases, RowFilter::Any);

        let delivered = hub.publish(Table::Cases, insert_event(Uuid::new_v4()));
        assert_eq!(delivered, 1);

        match sub.recv().await {
            Some(super::super::subscription::FeedMessage::Event(ChangeEvent::Inserted {
                ..
            })) => {}
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = ChangeFeedHub::new(16);
        assert_eq!(hub.publish(Table::Documents, insert_event(Uuid::new_v4())), 0);
    }

    #[tokio::test]
    async fn test_case_filter_skips_other_cases() {
        let hub = ChangeFeedHub::new(16);
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let mut sub = hub.subscribe(Table::CaseCollaborators, RowFilter::CaseId(mine));

        hub.publish(Table::CaseCollaborators, insert_event(theirs));
        hub.publish(Table::CaseCollaborators, insert_event(mine));

        // The first matching event is the one scoped to our case.
        let msg = sub.recv().await.unwrap();
        match msg {
            super::super::subscription::FeedMessage::Event(event) => {
                assert_eq!(event.case_id(), Some(mine));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_drop_releases_subscription() {
        let hub = ChangeFeedHub::new(16);
        let sub = hub.subscribe(Table::Notifications, RowFilter::Any);
        assert_eq!(hub.subscriber_count(Table::Notifications), 1);
        drop(sub);
        assert_eq!(hub.subscriber_count(Table::Notifications), 0);
    }

    #[tokio::test]
    async fn test_presence_channel_is_distinct() {
        let hub = ChangeFeedHub::new(16);
        let mut presence = hub.subscribe_presence();

        // Row events must not leak onto the presence channel.
        let mut rows = hub.subscribe(Table::Agents, RowFilter::Any);
        hub.publish_presence(PresenceSignal::Sync);
        hub.publish(Table::Agents, insert_event(Uuid::new_v4()));

        assert_eq!(presence.recv().await, Some(PresenceSignal::Sync));
        assert!(matches!(
            rows.recv().await,
            Some(super::super::subscription::FeedMessage::Event(_))
        ));
    }
}
