//!
//! Module with all dtos that are passed from server to viewers
//!

pub mod output;
