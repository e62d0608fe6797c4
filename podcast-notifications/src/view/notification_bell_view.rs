use super::time_ago::format_time_ago;
use crate::{
    dto::output::{NotificationBell, NotificationBellItem, NotificationPanel},
    repository::{Notification, NotificationKind},
    service::notification_store::NotificationStore,
};
use time::OffsetDateTime;

/// Higher unread counts are shown as "9+"
const BADGE_MAX_COUNT: usize = 9;

pub fn notification_bell(store: &NotificationStore, now: OffsetDateTime) -> NotificationBell {
    let unread_count = store.unread_count();

    let panel = if store.is_loading() {
        NotificationPanel::Loading
    } else if store.notifications().is_empty() {
        NotificationPanel::Empty
    } else {
        let items = store
            .notifications()
            .iter()
            .map(|notification| bell_item(notification, now))
            .collect();
        NotificationPanel::Items { items }
    };

    NotificationBell {
        badge: badge(unread_count),
        unread_count,
        show_mark_all_read: unread_count > 0,
        panel,
    }
}

fn bell_item(notification: &Notification, now: OffsetDateTime) -> NotificationBellItem {
    NotificationBellItem {
        id: notification.id.to_hex(),
        icon: icon(&notification.kind),
        title: notification.title.clone(),
        message: notification.message.clone(),
        unread: !notification.read,
        time_ago: format_time_ago(notification.created_at, now),
    }
}

fn badge(unread_count: usize) -> Option<String> {
    match unread_count {
        0 => None,
        count if count > BADGE_MAX_COUNT => Some(format!("{BADGE_MAX_COUNT}+")),
        count => Some(count.to_string()),
    }
}

fn icon(kind: &NotificationKind) -> &'static str {
    match kind {
        NotificationKind::NewEpisode => "🎧",
        NotificationKind::NewComment => "💬",
        NotificationKind::PlaylistUpdated => "📂",
        NotificationKind::Unknown(_) => "🔔",
    }
}
