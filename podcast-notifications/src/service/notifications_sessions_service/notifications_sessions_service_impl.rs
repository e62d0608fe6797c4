use super::{NotificationsSession, NotificationsSessionsService, NotificationsSessionsServiceConfig};
use crate::{
    dto::output,
    error::Error,
    repository::NotificationsRepository,
    service::session_context::SessionContext,
    view,
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::{collections::HashMap, sync::Arc};
use time::OffsetDateTime;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

pub struct NotificationsSessionsServiceImpl {
    config: NotificationsSessionsServiceConfig,
    repository: Arc<dyn NotificationsRepository>,
    sessions: RwLock<HashMap<Uuid, Arc<NotificationsSession>>>,
}

impl NotificationsSessionsServiceImpl {
    pub fn new(
        config: NotificationsSessionsServiceConfig,
        repository: Arc<dyn NotificationsRepository>,
    ) -> Self {
        Self {
            config,
            repository,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn session(&self, context: SessionContext) -> Result<Arc<NotificationsSession>, Error> {
        self.sessions
            .read()
            .await
            .get(&context.viewer_id)
            .cloned()
            .ok_or(Error::SessionNotExist)
    }

    ///
    /// Closes all opened sessions
    ///
    pub async fn close(&self) {
        let sessions = std::mem::take(&mut *self.sessions.write().await);
        tracing::info!(count = sessions.len(), "closing viewing sessions");

        for session in sessions.into_values() {
            session.close().await;
        }
    }
}

#[async_trait]
impl NotificationsSessionsService for NotificationsSessionsServiceImpl {
    async fn open_session(&self, context: SessionContext) -> Result<(), Error> {
        if self.session(context).await.is_ok() {
            tracing::debug!("viewing session already opened");
            return Ok(());
        }

        tracing::info!(viewer_id = %context.viewer_id, "opening viewing session");

        let session =
            NotificationsSession::open(&self.config, context, Arc::clone(&self.repository))
                .await?;

        let duplicate = {
            let mut sessions = self.sessions.write().await;
            match sessions.contains_key(&context.viewer_id) {
                true => Some(session),
                false => {
                    sessions.insert(context.viewer_id, Arc::new(session));
                    None
                }
            }
        };

        match duplicate {
            Some(session) => {
                tracing::debug!("viewing session opened concurrently, discarding");
                session.close().await;
            }
            None => tracing::info!("opened viewing session"),
        }

        Ok(())
    }

    async fn close_session(&self, context: SessionContext) -> Result<(), Error> {
        tracing::info!(viewer_id = %context.viewer_id, "closing viewing session");

        let session = self
            .sessions
            .write()
            .await
            .remove(&context.viewer_id)
            .ok_or(Error::SessionNotExist)?;
        session.close().await;

        tracing::info!("closed viewing session");

        Ok(())
    }

    async fn find_notifications(
        &self,
        context: SessionContext,
    ) -> Result<output::NotificationsPage, Error> {
        let session = self.session(context).await?;
        let store = session.store().read().await;

        Ok(output::NotificationsPage {
            notifications: store
                .notifications()
                .iter()
                .map(output::Notification::from)
                .collect(),
            unread_count: store.unread_count(),
            loading: store.is_loading(),
        })
    }

    async fn refresh_notifications(&self, context: SessionContext) -> Result<(), Error> {
        self.session(context).await?.refresh().await
    }

    async fn notification_bell(
        &self,
        context: SessionContext,
        now: OffsetDateTime,
    ) -> Result<output::NotificationBell, Error> {
        let session = self.session(context).await?;
        let store = session.store().read().await;

        Ok(view::notification_bell(&store, now))
    }

    async fn mark_notification_read(
        &self,
        context: SessionContext,
        id: ObjectId,
    ) -> Result<(), Error> {
        self.session(context)
            .await?
            .read_state_service()
            .mark_one_read(id)
            .await
    }

    async fn mark_all_notifications_read(&self, context: SessionContext) -> Result<(), Error> {
        self.session(context)
            .await?
            .read_state_service()
            .mark_all_read()
            .await
    }

    async fn subscribe_alerts(
        &self,
        context: SessionContext,
    ) -> Result<broadcast::Receiver<output::Alert>, Error> {
        self.session(context)
            .await?
            .subscribe_alerts()
            .await
            .ok_or(Error::SessionNotExist)
    }
}
