use std::str::FromStr;
use strum::EnumString;

///
/// Category of the notification.
///
/// Backend may introduce new categories at any time
/// so unrecognized values are kept in [NotificationKind::Unknown].
///
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    NewEpisode,
    NewComment,
    PlaylistUpdated,
    #[strum(default)]
    Unknown(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::NewEpisode => "new_episode",
            NotificationKind::NewComment => "new_comment",
            NotificationKind::PlaylistUpdated => "playlist_updated",
            NotificationKind::Unknown(kind) => kind,
        }
    }
}

impl From<String> for NotificationKind {
    fn from(kind: String) -> Self {
        NotificationKind::from_str(&kind).unwrap_or(NotificationKind::Unknown(kind))
    }
}
