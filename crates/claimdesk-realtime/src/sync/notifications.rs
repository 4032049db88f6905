//! Notification synchronization.
//!
//! Maintains a locally consistent view of the notification set and its
//! unread count, converging with server-authoritative change events.
//! The incremental merge is the low-latency path; `fetch_all` is the
//! source of truth, and any ambiguous event falls back to it.

use async_trait::async_trait;
use uuid::Uuid;

use claimdesk_core::events::ChangeEvent;
use claimdesk_core::result::AppResult;
use claimdesk_entity::notification::{Notification, NotificationKind};

/// Storage seam for the notification set.
///
/// The production implementation is the notification repository; tests
/// use an in-memory stand-in.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Returns the full notification set, newest first.
    async fn fetch_all(&self) -> AppResult<Vec<Notification>>;
    /// Inserts a notification and returns the stored row.
    async fn insert(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> AppResult<Notification>;
    /// Marks one notification read. `None` if the id does not exist.
    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>>;
    /// Marks every unread notification read. Returns rows affected.
    async fn mark_all_read(&self) -> AppResult<u64>;
    /// Deletes one notification. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    /// Deletes all notifications. Returns rows removed.
    async fn clear_all(&self) -> AppResult<u64>;
}

/// Client-held view of the notification set with a derived unread count.
#[derive(Debug)]
pub struct NotificationSync<B: NotificationBackend> {
    backend: B,
    notifications: Vec<Notification>,
    unread_count: usize,
}

impl<B: NotificationBackend> NotificationSync<B> {
    /// Creates an empty view. Call [`fetch_all`](Self::fetch_all) to load
    /// the initial snapshot.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            notifications: Vec::new(),
            unread_count: 0,
        }
    }

    /// The current local list, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The current unread count. Always equals the number of local rows
    /// with `is_read == false`.
    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Replaces the local list with a fresh snapshot and recomputes the
    /// unread count. Used on mount and as the recovery path after any
    /// ambiguous event.
    pub async fn fetch_all(&mut self) -> AppResult<()> {
        self.notifications = self.backend.fetch_all().await?;
        self.recount();
        Ok(())
    }

    /// Creates a notification and mirrors it locally (prepend + count).
    pub async fn create(
        &mut self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> AppResult<Notification> {
        let created = self.backend.insert(title, message, kind, link).await?;
        self.upsert_front(created.clone());
        Ok(created)
    }

    /// Marks one notification read, then mirrors the write locally.
    /// A backend failure leaves the prior state untouched.
    pub async fn mark_read(&mut self, id: Uuid) -> AppResult<()> {
        if let Some(updated) = self.backend.mark_read(id).await? {
            if let Some(local) = self.notifications.iter_mut().find(|n| n.id == id) {
                *local = updated;
            }
            self.recount();
        }
        Ok(())
    }

    /// Marks everything read. Idempotent: a second call is a no-op.
    pub async fn mark_all_read(&mut self) -> AppResult<()> {
        self.backend.mark_all_read().await?;
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.recount();
        Ok(())
    }

    /// Deletes one notification by id. Deleting an id that is not present
    /// is a no-op.
    pub async fn delete(&mut self, id: Uuid) -> AppResult<()> {
        self.backend.delete(id).await?;
        self.notifications.retain(|n| n.id != id);
        self.recount();
        Ok(())
    }

    /// Deletes every notification.
    pub async fn clear_all(&mut self) -> AppResult<()> {
        self.backend.clear_all().await?;
        self.notifications.clear();
        self.unread_count = 0;
        Ok(())
    }

    /// Merges one change-feed event into the local view.
    ///
    /// - `Inserted`: prepend the new row and recount.
    /// - `Updated`: replace the matching row in place, then refetch. The
    ///   payload cannot reveal the row's prior `is_read` state, so
    ///   incremental unread accounting would be unsafe.
    /// - `Deleted`: remove by id, then refetch.
    pub async fn apply_event(&mut self, event: &ChangeEvent) -> AppResult<()> {
        match event {
            ChangeEvent::Inserted { .. } => {
                let row: Notification = event.decode_row()?;
                self.upsert_front(row);
            }
            ChangeEvent::Updated { old_id, .. } => {
                let row: Notification = event.decode_row()?;
                if let Some(local) = self.notifications.iter_mut().find(|n| n.id == *old_id) {
                    *local = row;
                }
                self.fetch_all().await?;
            }
            ChangeEvent::Deleted { old_id, .. } => {
                self.notifications.retain(|n| n.id != *old_id);
                self.fetch_all().await?;
            }
        }
        Ok(())
    }

    /// Prepends a row unless it is already present (our own write may
    /// echo back through the change feed).
    fn upsert_front(&mut self, row: Notification) {
        if !self.notifications.iter().any(|n| n.id == row.id) {
            self.notifications.insert(0, row);
        }
        self.recount();
    }

    /// Unread is always a derived projection of the local list, never an
    /// independently maintained counter.
    fn recount(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| n.is_unread()).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::backend::testing::InMemoryNotifications;
    use claimdesk_core::events::ChangeEvent;

    async fn synced(backend: InMemoryNotifications) -> NotificationSync<InMemoryNotifications> {
        let mut sync = NotificationSync::new(backend);
        sync.fetch_all().await.unwrap();
        sync
    }

    #[tokio::test]
    async fn test_fetch_all_orders_newest_first() {
        let backend = InMemoryNotifications::default();
        let first = backend.push("first", false).await;
        let second = backend.push("second", false).await;

        let sync = synced(backend).await;
        assert_eq!(sync.notifications()[0].id, second.id);
        assert_eq!(sync.notifications()[1].id, first.id);
        assert_eq!(sync.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_unread_count_converges_after_interleaving() {
        let backend = InMemoryNotifications::default();
        let a = backend.push("a", false).await;
        let mut sync = synced(backend.clone()).await;

        // Server-side inserts arrive as events; a client mutation and an
        // out-of-band update interleave with them.
        let b = backend.push("b", false).await;
        sync.apply_event(&ChangeEvent::inserted(&b).unwrap())
            .await
            .unwrap();
        sync.mark_read(a.id).await.unwrap();
        let b_read = backend.set_read(b.id).await;
        sync.apply_event(&ChangeEvent::updated(&b_read, b.id).unwrap())
            .await
            .unwrap();
        let c = backend.push("c", false).await;
        sync.apply_event(&ChangeEvent::inserted(&c).unwrap())
            .await
            .unwrap();

        sync.fetch_all().await.unwrap();
        let derived = sync
            .notifications()
            .iter()
            .filter(|n| !n.is_read)
            .count();
        assert_eq!(sync.unread_count(), derived);
        assert_eq!(sync.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_read_is_idempotent() {
        let backend = InMemoryNotifications::default();
        backend.push("a", false).await;
        backend.push("b", false).await;
        let mut sync = synced(backend).await;

        sync.mark_all_read().await.unwrap();
        let after_once: Vec<_> = sync.notifications().to_vec();
        assert_eq!(sync.unread_count(), 0);

        sync.mark_all_read().await.unwrap();
        assert_eq!(sync.unread_count(), 0);
        assert_eq!(sync.notifications().len(), after_once.len());
        assert!(sync.notifications().iter().all(|n| n.is_read));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let backend = InMemoryNotifications::default();
        let a = backend.push("a", false).await;
        backend.push("b", false).await;
        let mut sync = synced(backend).await;

        sync.delete(a.id).await.unwrap();
        assert_eq!(sync.notifications().len(), 1);
        assert!(sync.notifications().iter().all(|n| n.id != a.id));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let backend = InMemoryNotifications::default();
        backend.push("a", false).await;
        let mut sync = synced(backend).await;

        sync.delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(sync.notifications().len(), 1);
        assert_eq!(sync.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_event_increments_unread() {
        let backend = InMemoryNotifications::default();
        let mut sync = synced(backend.clone()).await;

        let row = backend.push("fresh", false).await;
        sync.apply_event(&ChangeEvent::inserted(&row).unwrap())
            .await
            .unwrap();

        assert_eq!(sync.notifications()[0].id, row.id);
        assert_eq!(sync.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_event_echo_does_not_duplicate() {
        let backend = InMemoryNotifications::default();
        let mut sync = synced(backend.clone()).await;

        let created = sync
            .create("mine", "body", NotificationKind::Info, None)
            .await
            .unwrap();
        sync.apply_event(&ChangeEvent::inserted(&created).unwrap())
            .await
            .unwrap();

        assert_eq!(sync.notifications().len(), 1);
        assert_eq!(sync.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_event_refetches_count() {
        let backend = InMemoryNotifications::default();
        let a = backend.push("a", false).await;
        backend.push("b", true).await;
        let mut sync = synced(backend.clone()).await;
        assert_eq!(sync.unread_count(), 1);

        backend.remove(a.id).await;
        sync.apply_event(&ChangeEvent::deleted(&a, a.id).unwrap())
            .await
            .unwrap();

        assert_eq!(sync.notifications().len(), 1);
        assert_eq!(sync.unread_count(), 0);
    }
}
