mod notifications_feed_subscription;

pub use notifications_feed_subscription::*;
