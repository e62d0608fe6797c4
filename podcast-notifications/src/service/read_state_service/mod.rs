mod read_state_service;

pub use read_state_service::*;
