use crate::repository;
use bson::Document;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub data: Option<Document>,
}

impl From<&repository::Notification> for Notification {
    fn from(notification: &repository::Notification) -> Self {
        Self {
            id: notification.id.to_hex(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_string(),
            read: notification.read,
            created_at: notification.created_at,
            data: notification.data.clone(),
        }
    }
}
