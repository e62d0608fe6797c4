use super::Notification;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NotificationsPage {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub loading: bool,
}
