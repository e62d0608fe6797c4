use super::{dto::Notification, error::Error};
use axum::async_trait;
use bson::oid::ObjectId;
use futures::stream::BoxStream;
use uuid::Uuid;

///
/// Stream of notifications inserted into the database.
/// Items are not filtered by the owner.
///
pub type InsertionsStream = BoxStream<'static, Result<Notification, Error>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Finds the most recent notifications that belong to the user.
    /// Notifications are sorted descending by creation date.
    ///
    async fn find_recent(&self, user_id: Uuid, limit: usize) -> Result<Vec<Notification>, Error>;

    ///
    /// Opens stream of inserted notifications.
    ///
    /// Stream is not filtered by owner, subscriber
    /// is responsible for discarding notifications of other users.
    /// Dropping the stream releases the subscription.
    ///
    async fn watch_insertions(&self) -> Result<InsertionsStream, Error>;

    ///
    /// Sets read = true.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn update_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Sets read = true for all unread notifications of the user.
    ///
    /// ### Returns
    /// number of updated notifications
    ///
    async fn update_all_read(&self, user_id: Uuid) -> Result<u64, Error>;
}
