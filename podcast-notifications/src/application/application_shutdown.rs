use super::ApplicationStateToClose;
use crate::service::notifications_sessions_service::NotificationsSessionsServiceImpl;
use std::{future::Future, sync::Arc};

///
/// Waits for `signal` and closes every viewing session.
///
/// Server stops only after all responses finish and alerts streams
/// end when their session is closed, so sessions are closed before
/// the server stops rather than after.
///
pub async fn graceful_shutdown(
    signal: impl Future<Output = ()>,
    notifications_sessions_service: Arc<NotificationsSessionsServiceImpl>,
) {
    signal.await;

    tracing::info!("closing viewing sessions");
    notifications_sessions_service.close().await;
}

pub async fn close(state: ApplicationStateToClose) {
    tracing::info!("closing connection with database");
    state.db_client.shutdown().await;
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("starting shutdown");
}
