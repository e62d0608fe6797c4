use bson::{oid::ObjectId, DateTime, Document, Uuid};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct NotificationFindEntity {
    pub _id: ObjectId,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime,
    #[serde(default)]
    pub data: Option<Document>,
}
