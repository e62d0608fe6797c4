use super::ApplicationEnv;
use crate::{
    repository::NotificationsRepositoryImpl,
    service::notifications_sessions_service::{
        NotificationsSessionsService, NotificationsSessionsServiceConfig,
        NotificationsSessionsServiceImpl,
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub notifications_sessions_service: Arc<dyn NotificationsSessionsService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
    pub notifications_sessions_service: Arc<NotificationsSessionsServiceImpl>,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let notifications_repository = NotificationsRepositoryImpl::new(db).await?;
    let notifications_repository = Arc::new(notifications_repository);

    tracing::info!("creating services");
    let config = NotificationsSessionsServiceConfig {
        notifications_limit: env.notifications_limit,
        alerts_buffer_size: env.alerts_buffer_size,
    };
    let notifications_sessions_service =
        NotificationsSessionsServiceImpl::new(config, notifications_repository);
    let notifications_sessions_service = Arc::new(notifications_sessions_service);

    Ok((
        ApplicationState {
            notifications_sessions_service: notifications_sessions_service.clone(),
        },
        ApplicationStateToClose {
            db_client,
            notifications_sessions_service,
        },
    ))
}
