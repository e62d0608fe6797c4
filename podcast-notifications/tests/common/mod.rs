#![allow(dead_code)]

use bson::{doc, oid::ObjectId, Document};
use jwt_auth::test::create_jwt;
use mongodb::Client;
use std::sync::Once;
use time::OffsetDateTime;
use uuid::Uuid;

static INIT_ENV_ONCE: Once = Once::new();

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

pub fn address() -> String {
    std::env::var("PODCAST_NOTIFICATIONS_BIND_ADDRESS").unwrap()
}

pub fn create_viewer_jwt(user_id: Uuid) -> String {
    let jwt_algorithms = std::env::var("PODCAST_NOTIFICATIONS_JWT_ALGORITHMS").unwrap();
    let jwt_key = std::env::var("PODCAST_NOTIFICATIONS_JWT_TEST_ENCODE_KEY").unwrap();

    create_jwt(user_id, jwt_algorithms, jwt_key)
}

///
/// Inserts notification directly into the database,
/// the way other parts of the site publish them
///
pub async fn insert_notification(user_id: Uuid, kind: &str, title: &str) -> ObjectId {
    let connection_string =
        std::env::var("PODCAST_NOTIFICATIONS_DB_CONNECTION_STRING").unwrap();
    let db_name = std::env::var("PODCAST_NOTIFICATIONS_DB_NAME").unwrap();

    let client = Client::with_uri_str(connection_string).await.unwrap();
    let id = ObjectId::new();
    client
        .database(&db_name)
        .collection::<Document>("notifications")
        .insert_one(doc! {
            "_id": id,
            "user_id": bson::Uuid::from(user_id),
            "title": title,
            "message": format!("{title} message"),
            "type": kind,
            "read": false,
            "created_at": bson::DateTime::from(OffsetDateTime::now_utc()),
        })
        .await
        .unwrap();

    id
}
