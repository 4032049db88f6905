//! Notification CRUD.
//!
//! Every mutation fans out a change event per affected row; that is what
//! keeps each session's notification panel and unread badge converged.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::NotificationRepository;
use claimdesk_entity::notification::{Notification, NotificationKind};
use claimdesk_realtime::ChangeFeedHub;

/// Manages notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>, hub: Arc<ChangeFeedHub>) -> Self {
        Self { notif_repo, hub }
    }

    /// Lists all notifications, newest first.
    pub async fn list(&self) -> AppResult<Vec<Notification>> {
        self.notif_repo.find_all().await
    }

    /// Counts unread notifications.
    pub async fn unread_count(&self) -> AppResult<i64> {
        self.notif_repo.count_unread().await
    }

    /// Creates a notification and fans out the insert event.
    pub async fn create(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> AppResult<Notification> {
        let notification = self.notif_repo.create(title, message, kind, link).await?;
        self.hub
            .publish(Table::Notifications, ChangeEvent::inserted(&notification)?);
        info!(notification_id = %notification.id, kind = kind.as_str(), "Notification created");
        Ok(notification)
    }

    /// Marks one notification read and fans out the update event.
    pub async fn mark_read(&self, notification_id: Uuid) -> AppResult<Notification> {
        let notification = self
            .notif_repo
            .mark_read(notification_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Notification {notification_id} not found"))
            })?;
        self.hub.publish(
            Table::Notifications,
            ChangeEvent::updated(&notification, notification.id)?,
        );
        Ok(notification)
    }

    /// Marks everything read, one update event per affected row.
    pub async fn mark_all_read(&self) -> AppResult<u64> {
        let updated = self.notif_repo.mark_all_read().await?;
        for notification in &updated {
            self.hub.publish(
                Table::Notifications,
                ChangeEvent::updated(notification, notification.id)?,
            );
        }
        Ok(updated.len() as u64)
    }

    /// Deletes one notification and fans out the delete event.
    pub async fn delete(&self, notification_id: Uuid) -> AppResult<()> {
        let notification = self
            .notif_repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Notification {notification_id} not found"))
            })?;
        self.notif_repo.delete(notification_id).await?;
        self.hub.publish(
            Table::Notifications,
            ChangeEvent::deleted(&notification, notification_id)?,
        );
        Ok(())
    }

    /// Deletes every notification, one delete event per removed row.
    pub async fn clear_all(&self) -> AppResult<u64> {
        let removed = self.notif_repo.clear_all().await?;
        for notification in &removed {
            self.hub.publish(
                Table::Notifications,
                ChangeEvent::deleted(notification, notification.id)?,
            );
        }
        info!(count = removed.len(), "Notifications cleared");
        Ok(removed.len() as u64)
    }
}
