mod notification;
mod notification_kind;

pub use notification::*;
pub use notification_kind::*;
