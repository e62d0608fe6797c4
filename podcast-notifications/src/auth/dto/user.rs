use uuid::Uuid;

///
/// Viewer information retrieved from his JWT.
///
/// Authentication itself is done by an external identity provider,
/// the service only trusts tokens signed with the configured key.
///
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
}

impl User {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}
