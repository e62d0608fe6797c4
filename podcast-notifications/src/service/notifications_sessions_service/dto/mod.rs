mod notifications_sessions_service_config;

pub use notifications_sessions_service_config::*;
