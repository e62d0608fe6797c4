use super::{
    dto::Notification, entity::NotificationFindEntity, Error, InsertionsStream,
    NotificationsRepository,
};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::{StreamExt, TryStreamExt};
use mongodb::{
    change_stream::event::OperationType, options::IndexOptions, Collection, Database, IndexModel,
};
use uuid::Uuid;

const NOTIFICATIONS: &str = "notifications";
const INDEX_NAME_USER_ID_CREATED_AT: &str = "index_user_id_created_at";

///
/// Repository backed by MongoDB.
///
/// Change streams are only available on replica sets
/// so the database has to run as one (single node replica set is enough).
///
pub struct NotificationsRepositoryImpl {
    database: Database,
}

impl NotificationsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection_names = database.list_collection_names().await?;
        if !collection_names.iter().any(|name| name == NOTIFICATIONS) {
            database.create_collection(NOTIFICATIONS).await?;
            tracing::debug!("created collection {NOTIFICATIONS}");
        }

        let collection = database.collection(NOTIFICATIONS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_USER_ID_CREATED_AT.to_string()) {
            Self::create_user_id_created_at_index(&collection).await?;
            tracing::debug!("created index {NOTIFICATIONS}.{INDEX_NAME_USER_ID_CREATED_AT}");
        }

        Ok(Self { database })
    }

    async fn create_user_id_created_at_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "user_id": 1,
                "created_at": -1,
            })
            .options(
                IndexOptions::builder()
                    .name(INDEX_NAME_USER_ID_CREATED_AT.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn find_recent(&self, user_id: Uuid, limit: usize) -> Result<Vec<Notification>, Error> {
        let user_id = bson::Uuid::from(user_id);

        let notifications = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit as i64)
            .await?
            .map_ok(Notification::from)
            .try_collect()
            .await?;

        Ok(notifications)
    }

    async fn watch_insertions(&self) -> Result<InsertionsStream, Error> {
        let change_stream = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .watch()
            .pipeline([doc! {
                "$match": { "operationType": "insert" }
            }])
            .await?;

        let stream = change_stream
            .filter_map(|event| async move {
                match event {
                    Ok(event) => match (event.operation_type, event.full_document) {
                        (OperationType::Insert, Some(entity)) => {
                            Some(Ok(Notification::from(entity)))
                        }
                        (operation_type, _) => {
                            tracing::trace!(?operation_type, "skipping change event");
                            None
                        }
                    },
                    Err(err) => Some(Err(Error::Mongo(err))),
                }
            })
            .boxed();

        Ok(stream)
    }

    async fn update_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .database
            .collection::<Document>(NOTIFICATIONS)
            .update_one(
                doc! {
                    "_id": id,
                    "user_id": user_id,
                },
                doc! {
                    "$set": {
                        "read": true,
                    }
                },
            )
            .await?;

        // matched_count instead of modified_count because replacing
        // true with true doesn't count as modification
        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .database
            .collection::<Document>(NOTIFICATIONS)
            .update_many(
                doc! {
                    "user_id": user_id,
                    "read": false,
                },
                doc! {
                    "$set": {
                        "read": true,
                    }
                },
            )
            .await?;

        Ok(update_result.modified_count)
    }
}
