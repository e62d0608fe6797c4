//!
//! JWT helpers shared by services that trust tokens
//! issued by an external identity provider
//!

pub mod dto;
pub mod util;
