//!
//! Display surface of the notifications: view models rendered by the front-end
//!

mod notification_bell_view;
mod time_ago;

pub use notification_bell_view::*;
