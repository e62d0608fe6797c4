mod alert;
mod notification;
mod notification_bell;
mod notifications_page;

pub use alert::*;
pub use notification::*;
pub use notification_bell::*;
pub use notifications_page::*;
