mod notification_find_entity;

pub use notification_find_entity::*;
