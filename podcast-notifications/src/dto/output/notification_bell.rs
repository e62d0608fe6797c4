use serde::Serialize;

///
/// Everything needed to render the notification bell and its panel
///
#[derive(Debug, Serialize)]
pub struct NotificationBell {
    /// `None` when there is nothing unread
    pub badge: Option<String>,
    pub unread_count: usize,
    pub show_mark_all_read: bool,
    pub panel: NotificationPanel,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NotificationPanel {
    Loading,
    Empty,
    Items { items: Vec<NotificationBellItem> },
}

#[derive(Debug, Serialize)]
pub struct NotificationBellItem {
    pub id: String,
    pub icon: &'static str,
    pub title: String,
    pub message: String,
    pub unread: bool,
    pub time_ago: String,
}
