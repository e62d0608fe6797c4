use super::NotificationKind;
use crate::repository::entity::NotificationFindEntity;
use bson::{oid::ObjectId, Document};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ObjectId,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: OffsetDateTime,
    pub data: Option<Document>,
}

impl From<NotificationFindEntity> for Notification {
    fn from(entity: NotificationFindEntity) -> Self {
        Self {
            id: entity._id,
            user_id: entity.user_id.into(),
            title: entity.title,
            message: entity.message,
            kind: NotificationKind::from(entity.kind),
            read: entity.read,
            created_at: entity.created_at.into(),
            data: entity.data,
        }
    }
}
