mod dto;
mod notifications_session;
mod notifications_sessions_service;
mod notifications_sessions_service_impl;

pub use dto::NotificationsSessionsServiceConfig;
pub use notifications_session::*;
pub use notifications_sessions_service::*;
pub use notifications_sessions_service_impl::*;
