use super::NotificationsSessionsServiceConfig;
use crate::{
    dto::output,
    error::Error,
    repository::{self, NotificationsRepository},
    service::{
        notification_store::NotificationStore, notifications_feed::NotificationsFeedSubscription,
        read_state_service::ReadStateService, session_context::SessionContext,
    },
};
use std::sync::Arc;
use tokio::{
    sync::{broadcast, Mutex, RwLock},
    task::JoinHandle,
};

///
/// Notifications state of one viewer.
///
/// Owns the store, the feed subscription and the initial fetch.
/// Both background tasks are stopped by [Self::close] or when the session is dropped.
///
pub struct NotificationsSession {
    context: SessionContext,
    notifications_limit: usize,
    repository: Arc<dyn NotificationsRepository>,
    store: Arc<RwLock<NotificationStore>>,
    read_state_service: ReadStateService,
    alerts: Mutex<Option<broadcast::Sender<output::Alert>>>,
    feed_subscription: Mutex<Option<NotificationsFeedSubscription>>,
    loading_task: JoinHandle<()>,
}

impl NotificationsSession {
    ///
    /// Subscribes to the change feed and starts fetching the most recent notifications.
    ///
    /// Subscription starts before the fetch so notifications inserted
    /// in the meantime are not lost.
    ///
    pub async fn open(
        config: &NotificationsSessionsServiceConfig,
        context: SessionContext,
        repository: Arc<dyn NotificationsRepository>,
    ) -> Result<Self, repository::Error> {
        let store = Arc::new(RwLock::new(NotificationStore::new(
            config.notifications_limit,
        )));
        let (alerts, _) = broadcast::channel(config.alerts_buffer_size);

        let feed_subscription = NotificationsFeedSubscription::start(
            context,
            repository.as_ref(),
            Arc::clone(&store),
            alerts.clone(),
        )
        .await?;

        let loading_task = tokio::spawn(Self::load(
            context,
            config.notifications_limit,
            Arc::clone(&repository),
            Arc::clone(&store),
        ));

        let read_state_service =
            ReadStateService::new(context, Arc::clone(&repository), Arc::clone(&store));

        Ok(Self {
            context,
            notifications_limit: config.notifications_limit,
            repository,
            store,
            read_state_service,
            alerts: Mutex::new(Some(alerts)),
            feed_subscription: Mutex::new(Some(feed_subscription)),
            loading_task,
        })
    }

    #[tracing::instrument(
        name = "Notifications Initial Fetch",
        skip_all,
        fields(
            viewer_id = %context.viewer_id,
        )
    )]
    async fn load(
        context: SessionContext,
        limit: usize,
        repository: Arc<dyn NotificationsRepository>,
        store: Arc<RwLock<NotificationStore>>,
    ) {
        tracing::info!("fetching notifications");

        let result = repository.find_recent(context.viewer_id, limit).await;

        let mut store = store.write().await;
        match result {
            Ok(notifications) => {
                tracing::info!(count = notifications.len(), "fetched notifications");
                store.load_page(notifications);
            }
            Err(err) => tracing::warn!(%err, "failed to fetch notifications"),
        }
        store.finish_loading();
    }

    pub fn store(&self) -> &RwLock<NotificationStore> {
        &self.store
    }

    pub fn read_state_service(&self) -> &ReadStateService {
        &self.read_state_service
    }

    ///
    /// ### Returns
    /// None when session is already closed
    ///
    pub async fn subscribe_alerts(&self) -> Option<broadcast::Receiver<output::Alert>> {
        self.alerts.lock().await.as_ref().map(broadcast::Sender::subscribe)
    }

    ///
    /// Fetches the most recent notifications again.
    /// On failure store is left untouched.
    ///
    pub async fn refresh(&self) -> Result<(), Error> {
        tracing::info!("refreshing notifications");

        let notifications = self
            .repository
            .find_recent(self.context.viewer_id, self.notifications_limit)
            .await?;
        tracing::info!(count = notifications.len(), "fetched notifications");

        self.store.write().await.load_page(notifications);

        Ok(())
    }

    ///
    /// Stops background tasks and ends all alerts streams of the session
    ///
    pub async fn close(&self) {
        self.loading_task.abort();
        self.alerts.lock().await.take();

        let feed_subscription = self.feed_subscription.lock().await.take();
        if let Some(feed_subscription) = feed_subscription {
            feed_subscription.close().await;
        }

        tracing::debug!(viewer_id = %self.context.viewer_id, "closed viewing session");
    }
}

impl Drop for NotificationsSession {
    fn drop(&mut self) {
        self.loading_task.abort();
    }
}
