use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::User,
    dto::output,
    error::Error,
    service::{
        notifications_sessions_service::NotificationsSessionsService,
        session_context::SessionContext,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
    Extension, Json, Router,
};
use bson::oid::ObjectId;
use futures::{stream, Stream};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::broadcast::{self, error::RecvError};

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/session", post(open_session).delete(close_session))
        .route("/api/v1/notifications", get(find_notifications))
        .route("/api/v1/notifications/refresh", post(refresh_notifications))
        .route("/api/v1/notifications/bell", get(notification_bell))
        .route("/api/v1/notifications/read", put(mark_all_notifications_read))
        .route("/api/v1/notifications/:id/read", put(mark_notification_read))
        .route("/api/v1/alerts", get(alerts))
        .route_layer(application_middleware.auth.clone())
}

async fn open_session(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, Error> {
    service.open_session(SessionContext::from(&user)).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn close_session(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, Error> {
    service.close_session(SessionContext::from(&user)).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_notifications(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::NotificationsPage>, Error> {
    let page = service
        .find_notifications(SessionContext::from(&user))
        .await?;

    Ok(Json(page))
}

async fn refresh_notifications(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, Error> {
    service
        .refresh_notifications(SessionContext::from(&user))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn notification_bell(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::NotificationBell>, Error> {
    let bell = service
        .notification_bell(SessionContext::from(&user), OffsetDateTime::now_utc())
        .await?;

    Ok(Json(bell))
}

async fn mark_all_notifications_read(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, Error> {
    service
        .mark_all_notifications_read(SessionContext::from(&user))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn mark_notification_read(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = ObjectId::parse_str(&id).map_err(|_| Error::Validation("invalid notification id"))?;

    service
        .mark_notification_read(SessionContext::from(&user), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn alerts(
    State(service): State<Arc<dyn NotificationsSessionsService>>,
    Extension(user): Extension<User>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, Error> {
    let receiver = service
        .subscribe_alerts(SessionContext::from(&user))
        .await?;

    Ok(Sse::new(alerts_stream(receiver)).keep_alive(KeepAlive::default()))
}

///
/// Turns alerts receiver into SSE events.
/// Stream ends when the viewing session is closed.
///
fn alerts_stream(
    receiver: broadcast::Receiver<output::Alert>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(alert) => {
                    let event = Event::default().event("alert").json_data(&alert);
                    return Some((event, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "alerts receiver lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}
