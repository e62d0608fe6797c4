mod dto;
mod jwt_authorization_validator;

pub use dto::User;
pub use jwt_authorization_validator::*;
