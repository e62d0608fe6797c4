pub mod notification_store;
pub mod notifications_feed;
pub mod notifications_sessions_service;
pub mod read_state_service;
pub mod session_context;
