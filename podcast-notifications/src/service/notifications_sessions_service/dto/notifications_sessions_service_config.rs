#[derive(Debug, Clone)]
pub struct NotificationsSessionsServiceConfig {
    /// Max number of notifications held by a session
    pub notifications_limit: usize,
    pub alerts_buffer_size: usize,
}
