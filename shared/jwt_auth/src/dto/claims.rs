use serde::Deserialize;
use uuid::Uuid;

///
/// Claims required from every token.
/// `exp` is checked by [jsonwebtoken::Validation] so it's not stored.
///
#[derive(Deserialize)]
pub struct Claims {
    pub sub: Uuid,
}
