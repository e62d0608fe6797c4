use crate::auth::User;
use uuid::Uuid;

///
/// Identity of the viewer that owns a viewing session.
///
/// Passed to every session component instead of reading
/// the authenticated user from the request ad hoc.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub viewer_id: Uuid,
}

impl SessionContext {
    pub fn new(viewer_id: Uuid) -> Self {
        Self { viewer_id }
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.viewer_id == user_id
    }
}

impl From<&User> for SessionContext {
    fn from(user: &User) -> Self {
        Self::new(user.id)
    }
}
