use crate::repository;
use serde::Serialize;

///
/// Ephemeral message shown to the viewer when new notification arrives
///
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
}

impl From<&repository::Notification> for Alert {
    fn from(notification: &repository::Notification) -> Self {
        Self {
            id: notification.id.to_hex(),
            title: notification.title.clone(),
            message: notification.message.clone(),
        }
    }
}
