use crate::{
    dto::output,
    repository::{self, InsertionsStream, Notification, NotificationsRepository},
    service::{notification_store::NotificationStore, session_context::SessionContext},
};
use futures::StreamExt;
use std::sync::Arc;
use tokio::{
    sync::{broadcast, Notify, RwLock},
    task::JoinHandle,
};

///
/// Live subscription to notifications inserted into the database.
///
/// Accepted notifications are ingested into the store and
/// published as alerts. Subscription is released by [Self::close],
/// or, when that's not possible, by dropping it.
///
pub struct NotificationsFeedSubscription {
    close_notify: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl NotificationsFeedSubscription {
    pub async fn start(
        context: SessionContext,
        repository: &dyn NotificationsRepository,
        store: Arc<RwLock<NotificationStore>>,
        alerts: broadcast::Sender<output::Alert>,
    ) -> Result<Self, repository::Error> {
        let stream = repository.watch_insertions().await?;

        let close_notify = Arc::new(Notify::new());
        let feed = NotificationsFeed {
            context,
            store,
            alerts,
        };
        let task = tokio::spawn(feed.run(stream, Arc::clone(&close_notify)));

        tracing::debug!("started notifications feed");

        Ok(Self {
            close_notify,
            task: Some(task),
        })
    }

    pub async fn close(mut self) {
        self.close_notify.notify_one();

        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(%err, "notifications feed task failed");
            }
        }
    }
}

impl Drop for NotificationsFeedSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("aborting notifications feed");
            task.abort();
        }
    }
}

struct NotificationsFeed {
    context: SessionContext,
    store: Arc<RwLock<NotificationStore>>,
    alerts: broadcast::Sender<output::Alert>,
}

impl NotificationsFeed {
    #[tracing::instrument(
        name = "Notifications Feed",
        skip_all,
        fields(
            viewer_id = %self.context.viewer_id,
        )
    )]
    async fn run(self, mut stream: InsertionsStream, close_notify: Arc<Notify>) {
        tokio::select! {
            biased;

            _ = close_notify.notified() => {
                tracing::debug!("closing notifications feed");
            },

            _ = async {
                while let Some(result) = stream.next().await {
                    match result {
                        Ok(notification) => self.accept(notification).await,
                        Err(err) => tracing::warn!(%err, "failed to receive inserted notification"),
                    }
                }
            } => {
                tracing::warn!("insertions stream ended");
            }
        }
    }

    async fn accept(&self, notification: Notification) {
        if !self.context.is_owner(notification.user_id) {
            tracing::trace!(id = %notification.id, "skipping notification of other user");
            return;
        }

        let id = notification.id;
        let alert = output::Alert::from(&notification);

        let ingested = self.store.write().await.ingest(notification);
        if !ingested {
            tracing::debug!(%id, "notification already held");
            return;
        }

        tracing::info!(%id, "received notification");

        if self.alerts.send(alert).is_err() {
            tracing::trace!(%id, "alert dropped, no listeners");
        }
    }
}
