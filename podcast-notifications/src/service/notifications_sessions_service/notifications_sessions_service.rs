use crate::{
    dto::output,
    error::Error,
    service::session_context::SessionContext,
};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use tokio::sync::broadcast;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsSessionsService: Send + Sync {
    ///
    /// Opens viewing session: starts notifications feed subscription
    /// and fetching of the most recent notifications.
    /// Opening already opened session does nothing.
    ///
    async fn open_session(&self, context: SessionContext) -> Result<(), Error>;

    ///
    /// Closes viewing session and releases its subscription
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn close_session(&self, context: SessionContext) -> Result<(), Error>;

    ///
    /// Finds notifications held by the session
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn find_notifications(
        &self,
        context: SessionContext,
    ) -> Result<output::NotificationsPage, Error>;

    ///
    /// Fetches the most recent notifications again
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn refresh_notifications(&self, context: SessionContext) -> Result<(), Error>;

    ///
    /// Builds notification bell view model
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn notification_bell(
        &self,
        context: SessionContext,
        now: OffsetDateTime,
    ) -> Result<output::NotificationBell, Error>;

    ///
    /// Marks notification as read.
    /// Notification that is already read is not updated again.
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    /// - [Error::NotificationNotExist] when
    ///     - notification with id does not exist
    ///     - notification does not belong to the viewer
    ///
    async fn mark_notification_read(
        &self,
        context: SessionContext,
        id: ObjectId,
    ) -> Result<(), Error>;

    ///
    /// Marks all notifications of the viewer as read
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn mark_all_notifications_read(&self, context: SessionContext) -> Result<(), Error>;

    ///
    /// Subscribes to alerts published when new notification arrives
    ///
    /// ### Errors
    /// - [Error::SessionNotExist] when session is not opened
    ///
    async fn subscribe_alerts(
        &self,
        context: SessionContext,
    ) -> Result<broadcast::Receiver<output::Alert>, Error>;
}
