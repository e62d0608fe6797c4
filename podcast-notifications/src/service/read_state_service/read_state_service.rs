use crate::{
    error::Error,
    repository::{self, NotificationsRepository},
    service::{notification_store::NotificationStore, session_context::SessionContext},
};
use bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

///
/// Marks notifications of the viewer as read.
///
/// Store is updated before the database. When the database update fails
/// the local change is rolled back. Store lock is never held during
/// the database call, so notifications may be ingested in the meantime.
///
pub struct ReadStateService {
    context: SessionContext,
    repository: Arc<dyn NotificationsRepository>,
    store: Arc<RwLock<NotificationStore>>,
}

impl ReadStateService {
    pub fn new(
        context: SessionContext,
        repository: Arc<dyn NotificationsRepository>,
        store: Arc<RwLock<NotificationStore>>,
    ) -> Self {
        Self {
            context,
            repository,
            store,
        }
    }

    ///
    /// Marks notification as read.
    /// Marking notification that is already read locally is a no-op.
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when
    ///     - notification does not exist
    ///     - notification does not belong to the viewer
    ///
    pub async fn mark_one_read(&self, id: ObjectId) -> Result<(), Error> {
        tracing::info!(%id, "marking notification as read");

        let transaction = {
            let mut store = self.store.write().await;
            if store.get(id).is_some_and(|notification| notification.read) {
                tracing::debug!(%id, "notification already read");
                return Ok(());
            }

            store.begin_mark_read(id)
        };

        match self.repository.update_read(id, self.context.viewer_id).await {
            Ok(()) => {
                transaction.commit(&mut *self.store.write().await);
                tracing::info!(%id, "marked notification as read");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "failed to mark notification as read");
                transaction.rollback(&mut *self.store.write().await);

                match err {
                    repository::Error::NoDocumentUpdated => Err(Error::NotificationNotExist),
                    err => Err(Error::Database(err)),
                }
            }
        }
    }

    ///
    /// Marks all unread notifications of the viewer as read
    ///
    pub async fn mark_all_read(&self) -> Result<(), Error> {
        tracing::info!("marking all notifications as read");

        let transaction = self.store.write().await.begin_mark_all_read();

        match self.repository.update_all_read(self.context.viewer_id).await {
            Ok(count) => {
                transaction.commit(&mut *self.store.write().await);
                tracing::info!(count, "marked all notifications as read");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "failed to mark all notifications as read");
                transaction.rollback(&mut *self.store.write().await);
                Err(Error::Database(err))
            }
        }
    }
}
